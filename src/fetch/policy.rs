//! Backoff policy for question fetches.

use std::time::Duration;

use crate::config::RetryConfig;

/// How long to wait between failed fetches, and how many times to try.
///
/// Pure data; `FetchReducer` consults it when a request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub max_retries: u32,
    /// Wait used for a rate-limit response without `Retry-After`.
    pub default_retry_after: Duration,
}

impl BackoffPolicy {
    /// `min(min_delay × 2^attempt, max_delay)`; `attempt` is zero-based.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt)
            .and_then(|factor| self.min_delay.checked_mul(factor))
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    /// Delay after a rate-limit response: whichever is longer of the
    /// server's suggestion and the computed backoff. Not capped by
    /// `max_delay`.
    pub fn rate_limit_delay(&self, retry_after_secs: Option<u64>, attempt: u32) -> Duration {
        let suggested = retry_after_secs
            .map(Duration::from_secs)
            .unwrap_or(self.default_retry_after);
        suggested.max(self.delay_for_attempt(attempt))
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for BackoffPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            min_delay: Duration::from_millis(config.min_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            max_retries: config.max_retries,
            default_retry_after: Duration::from_secs(config.default_retry_after_seconds),
        }
    }
}
