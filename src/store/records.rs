//! Record types persisted by the collectors

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A signature inside the collection window; immutable once written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    pub signature: String,
    pub block_time: i64,
}

/// A resolved transaction. `payload` is the raw `getTransaction` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub signature: String,
    pub block_time: i64,
    pub payload: Value,
}
