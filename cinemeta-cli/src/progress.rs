//! Terminal progress for enrichment runs.

use std::cell::RefCell;

use cinemeta_lib::{EnrichEvent, EnrichProgress, LogProgress, RunLog};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Progress bar over the selected records, printing one line per outcome
/// and collecting the run log as it goes.
pub(crate) struct BarProgress {
    pb: RefCell<ProgressBar>,
    quiet: bool,
    log: RefCell<RunLog>,
}

impl BarProgress {
    pub(crate) fn new(source: &str, quiet: bool) -> Self {
        Self {
            pb: RefCell::new(ProgressBar::hidden()),
            quiet,
            log: RefCell::new(RunLog::new(source)),
        }
    }

    pub(crate) fn into_log(self) -> RunLog {
        self.pb.into_inner().finish_and_clear();
        self.log.into_inner()
    }

    fn println(&self, line: String) {
        self.pb.borrow().println(line);
    }
}

impl EnrichProgress for BarProgress {
    fn on_event(&self, event: &EnrichEvent) {
        self.log.borrow_mut().observe(event);

        // No bar when quiet; warnings still come through the logger.
        if self.quiet {
            LogProgress.on_event(event);
            return;
        }

        match event {
            EnrichEvent::Started {
                source,
                total,
                selected,
                resumed,
            } => {
                log::info!(
                    "{} {} of {} records need enrichment{}",
                    format!("[{}]", source).if_supports_color(Stdout, |t| t.bold()),
                    selected,
                    total,
                    if *resumed { " (resuming)" } else { "" },
                );
                if *selected > 0 {
                    let pb = ProgressBar::new(*selected as u64);
                    pb.set_style(
                        ProgressStyle::with_template(
                            "  {bar:40.cyan/blue} {pos}/{len} {wide_msg}",
                        )
                        .expect("static pattern")
                        .progress_chars("=> "),
                    );
                    *self.pb.borrow_mut() = pb;
                }
            }
            EnrichEvent::RecordStarted { label, .. } => {
                self.pb.borrow().set_message(label.clone());
            }
            EnrichEvent::Enriched {
                label,
                id,
                fields_written,
                ..
            } => {
                self.println(format!(
                    "  {} {} {}",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    label,
                    format!("({}, {} fields)", id, fields_written)
                        .if_supports_color(Stdout, |t| t.dimmed()),
                ));
                self.pb.borrow().inc(1);
            }
            EnrichEvent::NotFound { label, id, .. } => {
                self.println(format!(
                    "  {} {} {}",
                    "?".if_supports_color(Stdout, |t| t.yellow()),
                    label,
                    format!("({}, not found)", id).if_supports_color(Stdout, |t| t.dimmed()),
                ));
                self.pb.borrow().inc(1);
            }
            EnrichEvent::Backoff {
                label,
                attempt,
                wait,
                ..
            } => {
                self.pb.borrow().suspend(|| {
                    log::warn!(
                        "Rate limited on {} (attempt {}), waiting {}s",
                        label,
                        attempt,
                        wait.as_secs()
                    );
                });
            }
            EnrichEvent::Failed {
                label, id, error, ..
            } => {
                self.pb.borrow().suspend(|| {
                    log::warn!(
                        "{} {} ({}): {}",
                        "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                        label,
                        id,
                        error
                    );
                });
                self.pb.borrow().inc(1);
            }
            EnrichEvent::SkippedMissingId { label, .. } => {
                self.println(format!(
                    "  {} {} {}",
                    "-".if_supports_color(Stdout, |t| t.dimmed()),
                    label,
                    "(no IMDb id)".if_supports_color(Stdout, |t| t.dimmed()),
                ));
                self.pb.borrow().inc(1);
            }
            EnrichEvent::WouldFetch { label, id, .. } => match id {
                Some(id) => log::info!("  would fetch {} ({})", label, id),
                None => log::info!(
                    "  would skip {} {}",
                    label,
                    "(no IMDb id)".if_supports_color(Stdout, |t| t.dimmed())
                ),
            },
            EnrichEvent::Checkpoint { .. } => {
                let (level, line) = LogProgress::render(event);
                self.pb.borrow().suspend(|| log::log!(level, "{}", line));
            }
            EnrichEvent::Done { .. } => {
                self.pb.borrow().finish_and_clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use cinemeta_core::ImdbId;
    use cinemeta_lib::LogEntry;

    use super::*;

    fn run_events(quiet: bool) -> RunLog {
        let progress = BarProgress::new("imdb-api", quiet);
        let events = [
            EnrichEvent::Started {
                source: "imdb-api".to_string(),
                total: 2,
                selected: 1,
                resumed: false,
            },
            EnrichEvent::Enriched {
                index: 0,
                label: "Toy Story".to_string(),
                id: ImdbId::new(114709),
                fields_written: 6,
            },
            EnrichEvent::Checkpoint {
                path: PathBuf::from("out.jsonl"),
                processed: 1,
                selected: 1,
            },
        ];
        for event in &events {
            progress.on_event(event);
        }
        progress.into_log()
    }

    #[test]
    fn run_log_is_collected_with_or_without_bar() {
        for quiet in [false, true] {
            let log = run_events(quiet);
            assert_eq!(
                log.entries(),
                &[LogEntry::Enriched {
                    label: "Toy Story".to_string(),
                    id: "tt0114709".to_string(),
                    fields_written: 6,
                }]
            );
        }
    }
}
