//! Durable checkpoint logs
//!
//! Each half-window owns a signature log and a transaction log. Both are
//! append-only JSON Lines files; a restarted run rebuilds its seen-sets from
//! them and continues where the previous run stopped.

pub mod checkpoint;
pub mod records;

pub use checkpoint::CheckpointedStore;
pub use records::{SignatureRecord, TransactionRecord};
