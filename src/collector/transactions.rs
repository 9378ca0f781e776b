//! Transaction resolution for one half-window
//!
//! Walks the signature log in order and fetches every transaction that is not
//! yet in the transaction log. Failures are per-signature: they are logged,
//! counted and left for the next run.

use std::collections::HashSet;
use std::time::Duration;

use super::budget::TimeBudget;
use super::StopReason;
use crate::errors::SwapScopeError;
use crate::logger::{self, LogTag};
use crate::rpc::RpcClient;
use crate::store::{CheckpointedStore, SignatureRecord, TransactionRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionPassSummary {
    pub label: String,
    pub pending: usize,
    pub resolved: usize,
    pub missing: usize,
    pub failed: usize,
    pub stop: StopReason,
}

pub struct TransactionCollector<'a> {
    client: &'a RpcClient,
    encoding: &'a str,
    throttle: Duration,
    budget: &'a TimeBudget,
}

impl<'a> TransactionCollector<'a> {
    pub fn new(
        client: &'a RpcClient,
        encoding: &'a str,
        throttle: Duration,
        budget: &'a TimeBudget,
    ) -> Self {
        Self {
            client,
            encoding,
            throttle,
            budget,
        }
    }

    /// Resolve every signature in `signatures` that `store` does not hold yet
    ///
    /// Only storage failures are returned as errors.
    pub async fn collect(
        &self,
        label: &str,
        signatures: &[SignatureRecord],
        store: &mut CheckpointedStore<TransactionRecord>,
    ) -> Result<TransactionPassSummary, SwapScopeError> {
        let resolved: HashSet<String> = store
            .load_all()?
            .into_iter()
            .map(|record| record.signature)
            .collect();

        let pending: Vec<&SignatureRecord> = signatures
            .iter()
            .filter(|record| !resolved.contains(&record.signature))
            .collect();

        let mut summary = TransactionPassSummary {
            label: label.to_string(),
            pending: pending.len(),
            resolved: 0,
            missing: 0,
            failed: 0,
            stop: StopReason::Completed,
        };

        logger::info(
            LogTag::Transactions,
            &format!(
                "[{}] {} signatures, {} already resolved, {} pending",
                label,
                signatures.len(),
                resolved.len(),
                pending.len()
            ),
        );

        for (idx, record) in pending.iter().enumerate() {
            if idx > 0 && !self.throttle.is_zero() {
                tokio::time::sleep(self.throttle).await;
            }

            if self.budget.is_exhausted() {
                logger::warning(
                    LogTag::Transactions,
                    &format!(
                        "[{}] Time budget exhausted with {} of {} pending transactions resolved",
                        label, summary.resolved, summary.pending
                    ),
                );
                summary.stop = StopReason::BudgetExhausted;
                break;
            }

            match self.client.get_transaction(&record.signature, self.encoding).await {
                Ok(Some(payload)) => {
                    store.append(&TransactionRecord {
                        signature: record.signature.clone(),
                        block_time: record.block_time,
                        payload,
                    })?;
                    summary.resolved += 1;
                }
                Ok(None) => {
                    logger::warning(
                        LogTag::Transactions,
                        &format!("[{}] No transaction returned for {}", label, record.signature),
                    );
                    summary.missing += 1;
                }
                Err(e) => {
                    logger::error(
                        LogTag::Transactions,
                        &format!("[{}] Skipping {}: {}", label, record.signature, e),
                    );
                    summary.failed += 1;
                }
            }

            if (idx + 1) % 100 == 0 {
                logger::info(
                    LogTag::Transactions,
                    &format!("[{}] Progress: {}/{}", label, idx + 1, summary.pending),
                );
            }
        }

        logger::info(
            LogTag::Transactions,
            &format!(
                "[{}] {}: {} resolved, {} missing, {} failed",
                label, summary.stop, summary.resolved, summary.missing, summary.failed
            ),
        );

        Ok(summary)
    }
}
