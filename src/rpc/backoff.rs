//! Exponential backoff without jitter
//!
//! `delay_for(attempt) = min(max_delay, base_delay * 2^attempt)`

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    base_delay: Duration,
    max_delay: Duration,
}

impl BackoffPolicy {
    pub fn new(base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            base_delay,
            max_delay,
        }
    }

    /// Delay to sleep after the failure of attempt number `attempt` (0-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let max_ms = self.max_delay.as_millis();
        let delay_ms = match 1u128.checked_shl(attempt) {
            Some(multiplier) => self.base_delay.as_millis().saturating_mul(multiplier),
            None => max_ms,
        };
        Duration::from_millis(delay_ms.min(max_ms) as u64)
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_secs(30))
    }
}
