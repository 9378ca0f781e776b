//! Collection window in unix seconds, inclusive on both ends

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

/// Where a block time falls relative to a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPosition {
    /// Older than `start`; history is newest-first so paging can stop
    Below,
    Inside,
    /// Newer than `end`; keep paging toward the window
    Above,
}

impl TimeWindow {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn position(&self, block_time: i64) -> WindowPosition {
        if block_time < self.start {
            WindowPosition::Below
        } else if block_time > self.end {
            WindowPosition::Above
        } else {
            WindowPosition::Inside
        }
    }

    /// Split into two contiguous halves: `[start, mid]` and `[mid + 1, end]`
    ///
    /// A single-second window yields an empty second half (`start > end`).
    pub fn split_halves(&self) -> (TimeWindow, TimeWindow) {
        let mid = self.start + (self.end - self.start) / 2;
        (
            TimeWindow::new(self.start, mid),
            TimeWindow::new(mid + 1, self.end),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Human readable form for logs
    pub fn describe(&self) -> String {
        format!("{} → {}", format_unix(self.start), format_unix(self.end))
    }
}

/// Render unix seconds as RFC 3339 UTC; falls back to the raw number
pub fn format_unix(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| ts.to_string())
}
