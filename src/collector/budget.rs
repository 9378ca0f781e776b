//! Wall-clock budget shared by both collectors
//!
//! Checked cooperatively before every page fetch and every transaction
//! resolution. Running out is not an error: the current phase stops, keeps
//! what it has checkpointed, and the pipeline moves on.

use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    started: Instant,
    limit: Duration,
}

impl TimeBudget {
    /// Start the clock now
    pub fn new(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.started.elapsed() >= self.limit
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}
