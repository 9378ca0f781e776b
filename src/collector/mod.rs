//! History collection: signatures first, then full transactions
//!
//! Both collectors are resumable. Their only state lives in the checkpoint
//! logs, and both stop early (with a warning) once the time budget runs out.

pub mod budget;
pub mod signatures;
pub mod transactions;
pub mod window;

pub use budget::TimeBudget;
pub use signatures::{SignatureCollector, SignaturePassSummary};
pub use transactions::{TransactionCollector, TransactionPassSummary};
pub use window::{format_unix, TimeWindow, WindowPosition};

/// Why a collection pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Paged past the window start
    ReachedWindowStart,
    /// Node returned an empty page
    HistoryExhausted,
    /// Every pending signature was processed
    Completed,
    BudgetExhausted,
}

impl StopReason {
    pub fn is_partial(&self) -> bool {
        matches!(self, StopReason::BudgetExhausted)
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            StopReason::ReachedWindowStart => "reached window start",
            StopReason::HistoryExhausted => "history exhausted",
            StopReason::Completed => "completed",
            StopReason::BudgetExhausted => "time budget exhausted",
        };
        write!(f, "{}", text)
    }
}
