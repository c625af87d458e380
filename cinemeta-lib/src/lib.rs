//! Resumable batch enrichment of a record collection.
//!
//! [`BatchEnricher`] loads a collection (or the checkpoint of an earlier
//! run), picks the records that still need data, fetches from one
//! [`EnrichmentSource`](cinemeta_scraper::EnrichmentSource) at a time and
//! checkpoints the whole collection on a fixed cadence.

pub mod clock;
pub mod enricher;
pub mod error;
pub mod options;
pub mod progress;
pub mod retry;
pub mod run_log;
pub mod stats;

pub use clock::{Clock, SystemClock};
pub use enricher::BatchEnricher;
pub use error::EnrichError;
pub use options::{DEFAULT_SAVE_INTERVAL, EnrichOptions};
pub use progress::{EnrichEvent, EnrichProgress, LogProgress, SilentProgress};
pub use retry::RetryPolicy;
pub use run_log::{LogEntry, LogSummary, RunLog};
pub use stats::EnrichStats;
