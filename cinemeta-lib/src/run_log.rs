use std::path::{Path, PathBuf};

use crate::progress::EnrichEvent;
use crate::stats::EnrichStats;

/// One attempted record in the run log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Enriched {
        label: String,
        id: String,
        fields_written: usize,
    },
    NotFound {
        label: String,
        id: String,
    },
    RateLimited {
        label: String,
        id: String,
    },
    Error {
        label: String,
        id: String,
        message: String,
    },
    Skipped {
        label: String,
    },
}

impl LogEntry {
    /// The entry for a per-record outcome event, if it is one.
    pub fn from_event(event: &EnrichEvent) -> Option<Self> {
        let entry = match event {
            EnrichEvent::Enriched {
                label,
                id,
                fields_written,
                ..
            } => Self::Enriched {
                label: label.clone(),
                id: id.to_string(),
                fields_written: *fields_written,
            },
            EnrichEvent::NotFound { label, id, .. } => Self::NotFound {
                label: label.clone(),
                id: id.to_string(),
            },
            EnrichEvent::Failed {
                label,
                id,
                error: cinemeta_scraper::FetchError::RateLimited,
                ..
            } => Self::RateLimited {
                label: label.clone(),
                id: id.to_string(),
            },
            EnrichEvent::Failed {
                label, id, error, ..
            } => Self::Error {
                label: label.clone(),
                id: id.to_string(),
                message: error.to_string(),
            },
            EnrichEvent::SkippedMissingId { label, .. } => Self::Skipped {
                label: label.clone(),
            },
            _ => return None,
        };
        Some(entry)
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct LogSummary {
    pub enriched: usize,
    pub not_found: usize,
    pub rate_limited: usize,
    pub errors: usize,
    pub skipped: usize,
}

/// Collects per-record outcomes and writes a human-readable log file.
#[derive(Debug, Default)]
pub struct RunLog {
    source: String,
    entries: Vec<LogEntry>,
}

impl RunLog {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            entries: Vec::new(),
        }
    }

    /// `<output>.log` next to the output file.
    pub fn path_for(output: &Path) -> PathBuf {
        let mut name = output.as_os_str().to_os_string();
        name.push(".log");
        PathBuf::from(name)
    }

    pub fn add(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// Record the event if it describes a record outcome.
    pub fn observe(&mut self, event: &EnrichEvent) {
        if let Some(entry) = LogEntry::from_event(event) {
            self.add(entry);
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn summary(&self) -> LogSummary {
        let mut summary = LogSummary::default();
        for entry in &self.entries {
            match entry {
                LogEntry::Enriched { .. } => summary.enriched += 1,
                LogEntry::NotFound { .. } => summary.not_found += 1,
                LogEntry::RateLimited { .. } => summary.rate_limited += 1,
                LogEntry::Error { .. } => summary.errors += 1,
                LogEntry::Skipped { .. } => summary.skipped += 1,
            }
        }
        summary
    }

    /// Write the log to a file, replacing any earlier one.
    pub fn write_to_file(&self, path: &Path, stats: &EnrichStats) -> std::io::Result<()> {
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.write_to(&mut file, stats)?;
        std::io::Write::flush(&mut file)
    }

    pub fn write_to(&self, out: &mut impl std::io::Write, stats: &EnrichStats) -> std::io::Result<()> {
        let summary = self.summary();

        writeln!(out, "=== Enrichment Log ({}) ===", self.source)?;
        writeln!(
            out,
            "Date: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(out)?;
        writeln!(out, "--- Summary ---")?;
        writeln!(
            out,
            "Records: {} total, {} selected, {} already complete",
            stats.total,
            stats.selected,
            stats.already_complete()
        )?;
        writeln!(out, "Enriched: {}", summary.enriched)?;
        writeln!(out, "Not found: {}", summary.not_found)?;
        writeln!(out, "Rate limited: {}", summary.rate_limited)?;
        writeln!(out, "Errors: {}", summary.errors)?;
        writeln!(out, "Skipped (no id): {}", summary.skipped)?;
        writeln!(out, "Checkpoints: {}", stats.checkpoints)?;
        writeln!(out)?;
        writeln!(out, "--- Details ---")?;
        writeln!(out)?;

        for entry in &self.entries {
            match entry {
                LogEntry::Enriched {
                    label,
                    id,
                    fields_written,
                } => writeln!(out, "[OK] {} ({}): {} fields", label, id, fields_written)?,
                LogEntry::NotFound { label, id } => {
                    writeln!(out, "[NOT FOUND] {} ({})", label, id)?
                }
                LogEntry::RateLimited { label, id } => {
                    writeln!(out, "[RATE LIMITED] {} ({})", label, id)?
                }
                LogEntry::Error { label, id, message } => {
                    writeln!(out, "[ERROR] {} ({}): {}", label, id, message)?
                }
                LogEntry::Skipped { label } => writeln!(out, "[SKIPPED] {}: no external id", label)?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use cinemeta_core::ImdbId;
    use cinemeta_scraper::FetchError;

    use super::*;

    fn failed(error: FetchError) -> EnrichEvent {
        EnrichEvent::Failed {
            index: 0,
            label: "Heat".to_string(),
            id: ImdbId::new(113277),
            error,
        }
    }

    #[test]
    fn path_appends_log_extension() {
        assert_eq!(
            RunLog::path_for(Path::new("out/movies.jsonl")),
            PathBuf::from("out/movies.jsonl.log")
        );
    }

    #[test]
    fn rate_limited_failures_get_their_own_entry() {
        assert_eq!(
            LogEntry::from_event(&failed(FetchError::RateLimited)),
            Some(LogEntry::RateLimited {
                label: "Heat".to_string(),
                id: "tt0113277".to_string(),
            })
        );
        assert!(matches!(
            LogEntry::from_event(&failed(FetchError::transient("HTTP 503"))),
            Some(LogEntry::Error { .. })
        ));
    }

    #[test]
    fn non_outcome_events_are_ignored() {
        let mut log = RunLog::new("imdb-api");
        log.observe(&EnrichEvent::Checkpoint {
            path: PathBuf::from("x"),
            processed: 20,
            selected: 25,
        });
        assert!(log.entries().is_empty());
    }

    #[test]
    fn writes_summary_and_details() {
        let mut log = RunLog::new("imdb-api");
        log.observe(&EnrichEvent::Enriched {
            index: 0,
            label: "Toy Story".to_string(),
            id: ImdbId::new(114709),
            fields_written: 6,
        });
        log.observe(&EnrichEvent::NotFound {
            index: 1,
            label: "Jumanji".to_string(),
            id: ImdbId::new(113497),
        });
        log.observe(&failed(FetchError::RateLimited));
        log.observe(&EnrichEvent::SkippedMissingId {
            index: 3,
            label: "#4".to_string(),
        });

        let stats = EnrichStats {
            total: 10,
            selected: 4,
            checkpoints: 1,
            ..Default::default()
        };
        let mut out = Vec::new();
        log.write_to(&mut out, &stats).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("=== Enrichment Log (imdb-api) ==="));
        assert!(text.contains("Records: 10 total, 4 selected, 6 already complete"));
        assert!(text.contains("[OK] Toy Story (tt0114709): 6 fields"));
        assert!(text.contains("[NOT FOUND] Jumanji (tt0113497)"));
        assert!(text.contains("[RATE LIMITED] Heat (tt0113277)"));
        assert!(text.contains("[SKIPPED] #4: no external id"));
        assert_eq!(
            log.summary(),
            LogSummary {
                enriched: 1,
                not_found: 1,
                rate_limited: 1,
                errors: 0,
                skipped: 1,
            }
        );
    }
}
