use std::time::Duration;

use cinemeta_core::{FieldMap, ImdbId};
use cinemeta_scraper::{EnrichmentSource, FetchError};

use crate::clock::Clock;

/// How long to wait after the provider throttles us.
pub const DEFAULT_RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(60);

/// Retry rule for a single record. Only [`FetchError::RateLimited`] is
/// retried; every other failure is returned after the first attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first. Must be at least 1.
    pub max_attempts: u32,
    /// Wait before each retry.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff: DEFAULT_RATE_LIMIT_BACKOFF,
        }
    }
}

impl RetryPolicy {
    /// A single attempt, never waits.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    /// Fetch `id`, sleeping on `clock` and retrying while rate limited.
    ///
    /// `on_backoff(attempt, wait)` is called right before each wait.
    pub fn fetch<S, C>(
        &self,
        source: &S,
        id: ImdbId,
        clock: &C,
        mut on_backoff: impl FnMut(u32, Duration),
    ) -> Result<FieldMap, FetchError>
    where
        S: EnrichmentSource + ?Sized,
        C: Clock + ?Sized,
    {
        let mut attempt = 1;
        loop {
            match source.fetch(id) {
                Err(FetchError::RateLimited) if attempt < self.max_attempts => {
                    on_backoff(attempt, self.backoff);
                    clock.sleep(self.backoff);
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    struct Scripted(RefCell<VecDeque<Result<FieldMap, FetchError>>>);

    impl Scripted {
        fn new(responses: Vec<Result<FieldMap, FetchError>>) -> Self {
            Self(RefCell::new(responses.into()))
        }

        fn remaining(&self) -> usize {
            self.0.borrow().len()
        }
    }

    impl EnrichmentSource for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn fetch(&self, _id: ImdbId) -> Result<FieldMap, FetchError> {
            self.0
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(FetchError::NotFound))
        }
    }

    #[derive(Default)]
    struct Sleeps(RefCell<Vec<Duration>>);

    impl Clock for Sleeps {
        fn sleep(&self, duration: Duration) {
            self.0.borrow_mut().push(duration);
        }
    }

    #[test]
    fn retries_once_after_rate_limit() {
        let source = Scripted::new(vec![Err(FetchError::RateLimited), Ok(FieldMap::new())]);
        let clock = Sleeps::default();
        let mut backoffs = Vec::new();

        let result = RetryPolicy::default().fetch(&source, ImdbId::new(1), &clock, |a, w| {
            backoffs.push((a, w))
        });

        assert!(result.is_ok());
        assert_eq!(*clock.0.borrow(), vec![Duration::from_secs(60)]);
        assert_eq!(backoffs, vec![(1, Duration::from_secs(60))]);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let source = Scripted::new(vec![
            Err(FetchError::RateLimited),
            Err(FetchError::RateLimited),
            Ok(FieldMap::new()),
        ]);
        let clock = Sleeps::default();

        let result = RetryPolicy::default().fetch(&source, ImdbId::new(1), &clock, |_, _| {});

        assert_eq!(result, Err(FetchError::RateLimited));
        assert_eq!(clock.0.borrow().len(), 1);
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn other_failures_are_not_retried() {
        let source = Scripted::new(vec![
            Err(FetchError::transient("HTTP 503")),
            Ok(FieldMap::new()),
        ]);
        let clock = Sleeps::default();

        let result = RetryPolicy::default().fetch(&source, ImdbId::new(1), &clock, |_, _| {});

        assert!(matches!(result, Err(FetchError::Transient(_))));
        assert!(clock.0.borrow().is_empty());
    }

    #[test]
    fn no_retry_never_sleeps() {
        let source = Scripted::new(vec![Err(FetchError::RateLimited)]);
        let clock = Sleeps::default();

        let result = RetryPolicy::no_retry().fetch(&source, ImdbId::new(1), &clock, |_, _| {});

        assert_eq!(result, Err(FetchError::RateLimited));
        assert!(clock.0.borrow().is_empty());
    }
}
