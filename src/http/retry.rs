use std::time::Duration;

/// Backoff applied to transient (5xx) upstream failures
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub initial_delay: Duration,
    pub multiplier: u32,
    /// `None` keeps retrying for as long as the upstream answers 5xx
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(1000),
            multiplier: 2,
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    pub fn new(initial_delay_ms: u64, max_attempts: Option<u32>) -> Self {
        Self {
            initial_delay: Duration::from_millis(initial_delay_ms),
            max_attempts,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (1-based)
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let factor = self
            .multiplier
            .checked_pow(retry.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.initial_delay.saturating_mul(factor)
    }

    /// Whether another attempt is allowed after `attempts` have been made
    pub fn allows_another(&self, attempts: u32) -> bool {
        self.max_attempts.map_or(true, |max| attempts < max)
    }
}
