//! Progress reporting for enrichment runs.

use std::path::PathBuf;
use std::time::Duration;

use cinemeta_core::ImdbId;
use cinemeta_scraper::FetchError;

use crate::stats::EnrichStats;

/// Events emitted while a run progresses.
#[derive(Debug, Clone)]
pub enum EnrichEvent {
    /// Collection loaded and records selected.
    Started {
        source: String,
        total: usize,
        selected: usize,
        resumed: bool,
    },
    /// About to handle the `position`-th selected record (1-based).
    RecordStarted {
        position: usize,
        selected: usize,
        index: usize,
        label: String,
    },
    Enriched {
        index: usize,
        label: String,
        id: ImdbId,
        fields_written: usize,
    },
    NotFound {
        index: usize,
        label: String,
        id: ImdbId,
    },
    /// Throttled; waiting `wait` before attempt `attempt + 1`.
    Backoff {
        index: usize,
        label: String,
        attempt: u32,
        wait: Duration,
    },
    /// Any failure other than not-found, after retries.
    Failed {
        index: usize,
        label: String,
        id: ImdbId,
        error: FetchError,
    },
    SkippedMissingId {
        index: usize,
        label: String,
    },
    /// Selected record in a dry run.
    WouldFetch {
        index: usize,
        label: String,
        id: Option<ImdbId>,
    },
    /// Whole collection saved after `processed` of `selected` records.
    Checkpoint {
        path: PathBuf,
        processed: usize,
        selected: usize,
    },
    Done {
        stats: EnrichStats,
    },
}

/// Receives [`EnrichEvent`]s as a run progresses.
pub trait EnrichProgress {
    fn on_event(&self, event: &EnrichEvent);
}

/// Discards all events.
pub struct SilentProgress;

impl EnrichProgress for SilentProgress {
    fn on_event(&self, _event: &EnrichEvent) {}
}

/// Reports through the `log` crate.
pub struct LogProgress;

impl LogProgress {
    /// The level and line logged for `event`.
    pub fn render(event: &EnrichEvent) -> (log::Level, String) {
        use log::Level::{Debug, Info, Warn};

        match event {
            EnrichEvent::Started {
                source,
                total,
                selected,
                resumed,
            } => (
                Info,
                format!(
                    "{}: {} of {} records need enrichment{}",
                    source,
                    selected,
                    total,
                    if *resumed { " (resumed)" } else { "" }
                ),
            ),
            EnrichEvent::RecordStarted {
                position,
                selected,
                label,
                ..
            } => (Debug, format!("  [{}/{}] {}", position, selected, label)),
            EnrichEvent::Enriched {
                label,
                id,
                fields_written,
                ..
            } => (
                Info,
                format!("  {} ({}): {} fields", label, id, fields_written),
            ),
            EnrichEvent::NotFound { label, id, .. } => {
                (Info, format!("  {} ({}): not found", label, id))
            }
            EnrichEvent::Backoff {
                label,
                attempt,
                wait,
                ..
            } => (
                Warn,
                format!(
                    "  {}: rate limited on attempt {}, waiting {}s",
                    label,
                    attempt,
                    wait.as_secs()
                ),
            ),
            EnrichEvent::Failed {
                label, id, error, ..
            } => (Warn, format!("  {} ({}): {}", label, id, error)),
            EnrichEvent::SkippedMissingId { label, .. } => {
                (Warn, format!("  {}: no external id, skipped", label))
            }
            EnrichEvent::WouldFetch { label, id, .. } => match id {
                Some(id) => (Info, format!("  would fetch {} ({})", label, id)),
                None => (Info, format!("  would skip {} (no external id)", label)),
            },
            EnrichEvent::Checkpoint {
                path,
                processed,
                selected,
            } => (
                Info,
                format!(
                    "Saved progress: {}/{} records processed ({})",
                    processed,
                    selected,
                    path.display()
                ),
            ),
            EnrichEvent::Done { stats } => (Info, format!("Done: {}", stats)),
        }
    }
}

impl EnrichProgress for LogProgress {
    fn on_event(&self, event: &EnrichEvent) {
        let (level, line) = Self::render(event);
        log::log!(level, "{}", line);
    }
}

impl<P: EnrichProgress + ?Sized> EnrichProgress for &P {
    fn on_event(&self, event: &EnrichEvent) {
        (**self).on_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoints_are_reported_at_info() {
        let event = EnrichEvent::Checkpoint {
            path: PathBuf::from("out.jsonl"),
            processed: 20,
            selected: 25,
        };
        assert_eq!(
            LogProgress::render(&event),
            (
                log::Level::Info,
                "Saved progress: 20/25 records processed (out.jsonl)".to_string()
            )
        );
    }

    #[test]
    fn failures_are_reported_at_warn() {
        let event = EnrichEvent::Failed {
            index: 0,
            label: "Heat".to_string(),
            id: ImdbId::new(113277),
            error: FetchError::transient("HTTP 503"),
        };
        let (level, line) = LogProgress::render(&event);
        assert_eq!(level, log::Level::Warn);
        assert!(line.contains("Heat (tt0113277)"));
        assert!(line.contains("HTTP 503"));
    }
}
