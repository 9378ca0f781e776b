//! Aggregation engine
//!
//! Recomputes the wallet map from scratch on every run by folding every
//! transaction log, then overwrites the persisted snapshot. Re-running is
//! therefore idempotent.

pub mod attribution;
pub mod delta;
pub mod wallet_stats;

use std::path::{Path, PathBuf};

pub use attribution::attribute_wallet;
pub use delta::{token_delta, DeltaOutcome};
pub use wallet_stats::{
    load_wallet_map, save_wallet_map, AggregationSummary, Aggregator, WalletMap, WalletStat,
};

use crate::errors::SwapScopeError;
use crate::logger::{self, LogTag};
use crate::store::{CheckpointedStore, TransactionRecord};

/// Fold every transaction log into a fresh wallet map and persist it
pub fn aggregate_logs(
    logs: &[PathBuf],
    mint: &str,
    output: &Path,
) -> Result<(WalletMap, AggregationSummary), SwapScopeError> {
    let mut aggregator = Aggregator::new(mint);

    for path in logs {
        let records = CheckpointedStore::<TransactionRecord>::new(path).load_all()?;
        logger::debug(
            LogTag::Aggregate,
            &format!("Folding {} transactions from {}", records.len(), path.display()),
        );
        for record in &records {
            aggregator.fold(record);
        }
    }

    let (wallets, summary) = aggregator.finish();
    save_wallet_map(output, &wallets)?;

    logger::info(
        LogTag::Aggregate,
        &format!(
            "Aggregated {} wallets from {} transactions ({} folded, {} unattributed, {} duplicates, {} without meta, {} malformed)",
            wallets.len(),
            summary.transactions,
            summary.folded,
            summary.unattributed,
            summary.duplicates,
            summary.no_meta,
            summary.malformed
        ),
    );

    Ok((wallets, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(signature: &str, wallet: &str, delta: i64) -> TransactionRecord {
        TransactionRecord {
            signature: signature.to_string(),
            block_time: 1_000,
            payload: json!({
                "meta": {
                    "preTokenBalances": [],
                    "postTokenBalances": [
                        {"accountIndex": 1, "mint": "M", "owner": wallet, "uiTokenAmount": {"amount": delta.to_string()}}
                    ]
                },
                "transaction": {"message": {"header": {"numRequiredSignatures": 1}, "accountKeys": [wallet]}}
            }),
        }
    }

    #[test]
    fn test_rerun_over_logs_never_double_counts() {
        let dir = tempfile::tempdir().unwrap();
        let h1 = dir.path().join("transactions_h1.jsonl");
        let h2 = dir.path().join("transactions_h2.jsonl");
        let output = dir.path().join("wallet_stats.json");

        let mut store = CheckpointedStore::new(&h2);
        store.append(&record("s1", "A", 5)).unwrap();
        store.append(&record("s2", "B", 7)).unwrap();
        let mut store = CheckpointedStore::new(&h1);
        store.append(&record("s3", "A", 1)).unwrap();
        store.append(&record("s1", "A", 5)).unwrap();

        let logs = vec![h2, h1];
        let (first, summary) = aggregate_logs(&logs, "M", &output).unwrap();
        let (second, _) = aggregate_logs(&logs, "M", &output).unwrap();

        assert_eq!(first, second);
        assert_eq!(first["A"].swaps, 2);
        assert_eq!(first["A"].pnl_base_units, 6);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(load_wallet_map(&output).unwrap(), second);
    }

    #[test]
    fn test_missing_logs_produce_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("wallet_stats.json");
        let (wallets, _) = aggregate_logs(&[dir.path().join("none.jsonl")], "M", &output).unwrap();
        assert!(wallets.is_empty());
        assert!(output.exists());
    }
}
