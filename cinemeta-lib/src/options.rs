use std::time::Duration;

use crate::error::EnrichError;
use crate::retry::RetryPolicy;

/// Records processed between checkpoints.
pub const DEFAULT_SAVE_INTERVAL: usize = 20;

/// Options for one enrichment run.
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Checkpoint after this many processed records. 0 saves only at the end.
    pub save_interval: usize,
    /// Pause between successive fetches. Not applied before the first one.
    pub request_delay: Duration,
    /// Rate-limit handling per record.
    pub retry: RetryPolicy,
    /// Stop after selecting this many records.
    pub limit: Option<usize>,
    /// Select and report, but never fetch or save.
    pub dry_run: bool,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            save_interval: DEFAULT_SAVE_INTERVAL,
            request_delay: Duration::ZERO,
            retry: RetryPolicy::default(),
            limit: None,
            dry_run: false,
        }
    }
}

impl EnrichOptions {
    pub fn validate(&self) -> Result<(), EnrichError> {
        if self.retry.max_attempts == 0 {
            return Err(EnrichError::invalid_options(
                "retry.max_attempts must be at least 1",
            ));
        }
        Ok(())
    }

    /// Whether a checkpoint is due after `processed` records.
    pub fn checkpoint_due(&self, processed: usize) -> bool {
        self.save_interval > 0 && processed > 0 && processed.is_multiple_of(self.save_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = EnrichOptions::default();
        assert_eq!(options.save_interval, 20);
        assert_eq!(options.request_delay, Duration::ZERO);
        assert_eq!(options.retry.max_attempts, 2);
        assert_eq!(options.retry.backoff, Duration::from_secs(60));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn checkpoint_cadence() {
        let options = EnrichOptions::default();
        assert!(!options.checkpoint_due(0));
        assert!(!options.checkpoint_due(19));
        assert!(options.checkpoint_due(20));
        assert!(options.checkpoint_due(40));

        let never = EnrichOptions {
            save_interval: 0,
            ..Default::default()
        };
        assert!(!never.checkpoint_due(20));
    }

    #[test]
    fn zero_attempts_rejected() {
        let options = EnrichOptions {
            retry: RetryPolicy {
                max_attempts: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(EnrichError::InvalidOptions(_))
        ));
    }
}
