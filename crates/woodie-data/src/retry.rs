//! Retry policies for upstream requests.

use crate::FetchError;
use std::time::Duration;

/// Backoff strategy between retry attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackoffStrategy {
    /// No delay between retries.
    None,
    /// Fixed delay between retries.
    Fixed(Duration),
    /// Exponential backoff with base and max.
    Exponential {
        /// Initial delay.
        base: Duration,
        /// Maximum delay.
        max: Duration,
    },
}

impl BackoffStrategy {
    /// Delay before retry number `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(d) => *d,
            Self::Exponential { base, max } => {
                let factor = 2u32.saturating_pow(attempt);
                base.saturating_mul(factor).min(*max)
            }
        }
    }
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(200),
            max: Duration::from_secs(2),
        }
    }
}

/// How many times to retry, and how long to wait in between.
///
/// Server errors (5xx), timeouts and connection failures are retried;
/// client errors are returned immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Backoff strategy.
    pub backoff: BackoffStrategy,
}

impl RetryPolicy {
    /// Retry up to `max_retries` times with the default backoff.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: BackoffStrategy::default(),
        }
    }

    /// Never retry.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: BackoffStrategy::None,
        }
    }

    /// Set backoff strategy.
    pub fn with_backoff(mut self, strategy: BackoffStrategy) -> Self {
        self.backoff = strategy;
        self
    }

    /// Should a response with `status` be retried after `attempt` retries?
    pub fn should_retry_status(&self, status: u16, attempt: u32) -> bool {
        attempt < self.max_retries && (500..600).contains(&status)
    }

    /// Should a failed request be retried after `attempt` retries?
    pub fn should_retry_error(&self, error: &FetchError, attempt: u32) -> bool {
        attempt < self.max_retries && error.is_transient()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_backoff_caps() {
        let backoff = BackoffStrategy::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_millis(500),
        };
        assert_eq!(backoff.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(backoff.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(backoff.delay_for_attempt(2), Duration::from_millis(400));
        assert_eq!(backoff.delay_for_attempt(3), Duration::from_millis(500));
        assert_eq!(backoff.delay_for_attempt(40), Duration::from_millis(500));
    }

    #[test]
    fn test_fixed_and_none() {
        assert_eq!(BackoffStrategy::None.delay_for_attempt(3), Duration::ZERO);
        assert_eq!(
            BackoffStrategy::Fixed(Duration::from_millis(7)).delay_for_attempt(3),
            Duration::from_millis(7)
        );
    }

    #[test]
    fn test_retry_on_server_errors_only() {
        let policy = RetryPolicy::new(2);
        assert!(policy.should_retry_status(503, 0));
        assert!(policy.should_retry_status(500, 1));
        assert!(!policy.should_retry_status(500, 2));
        assert!(!policy.should_retry_status(404, 0));
        assert!(!policy.should_retry_status(200, 0));
    }

    #[test]
    fn test_retry_on_transient_errors() {
        let policy = RetryPolicy::new(1);
        assert!(policy.should_retry_error(&FetchError::Timeout, 0));
        assert!(policy.should_retry_error(&FetchError::ConnectionError("refused".into()), 0));
        assert!(!policy.should_retry_error(&FetchError::ParseError("bad".into()), 0));
        assert!(!policy.should_retry_error(&FetchError::Timeout, 1));
    }

    #[test]
    fn test_no_retry_policy() {
        let policy = RetryPolicy::none();
        assert!(!policy.should_retry_status(503, 0));
        assert!(!policy.should_retry_error(&FetchError::Timeout, 0));
    }
}
