use log::debug;
use std::time::Duration;
use tokio::time::sleep;

use crate::pagination::PaginationConfig;

/// Paces listing requests: a flat pause before every page after the first.
/// A zero delay disables pacing.
pub struct RateLimiter {
    delay: Duration,
    pages_requested: usize,
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            pages_requested: 0,
        }
    }

    pub fn from_config(config: &PaginationConfig) -> Self {
        Self::new(config.page_delay_ms)
    }

    /// Wait until the next page may be requested
    pub async fn wait_for_next_page(&mut self) {
        if self.pages_requested > 0 && !self.delay.is_zero() {
            debug!("Pausing {:?} before page {}", self.delay, self.pages_requested + 1);
            sleep(self.delay).await;
        }
        self.pages_requested += 1;
    }

    pub fn pages_requested(&self) -> usize {
        self.pages_requested
    }
}
