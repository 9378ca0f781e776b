//! Signature collection for one half-window
//!
//! Pages backward through the program's history with a `before` cursor and
//! keeps every signature whose block time falls inside the window. History is
//! newest-first, so the first item older than the window start ends the pass.

use std::collections::HashSet;

use super::budget::TimeBudget;
use super::window::{TimeWindow, WindowPosition};
use super::StopReason;
use crate::errors::SwapScopeError;
use crate::logger::{self, LogTag};
use crate::rpc::RpcClient;
use crate::store::{CheckpointedStore, SignatureRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignaturePassSummary {
    pub label: String,
    pub pages: usize,
    pub appended: usize,
    pub duplicates: usize,
    pub skipped_no_block_time: usize,
    pub skipped_after_window: usize,
    pub stop: StopReason,
}

impl SignaturePassSummary {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            pages: 0,
            appended: 0,
            duplicates: 0,
            skipped_no_block_time: 0,
            skipped_after_window: 0,
            stop: StopReason::HistoryExhausted,
        }
    }
}

pub struct SignatureCollector<'a> {
    client: &'a RpcClient,
    program_address: &'a str,
    page_limit: usize,
    budget: &'a TimeBudget,
}

impl<'a> SignatureCollector<'a> {
    pub fn new(
        client: &'a RpcClient,
        program_address: &'a str,
        page_limit: usize,
        budget: &'a TimeBudget,
    ) -> Self {
        Self {
            client,
            program_address,
            page_limit,
            budget,
        }
    }

    /// Collect the window into `store`, resuming from its last record
    ///
    /// Non-retryable RPC failures and storage failures are returned to the
    /// caller; budget exhaustion is reported through `StopReason`.
    pub async fn collect(
        &self,
        label: &str,
        window: TimeWindow,
        store: &mut CheckpointedStore<SignatureRecord>,
    ) -> Result<SignaturePassSummary, SwapScopeError> {
        let mut summary = SignaturePassSummary::new(label);

        let existing = store.load_all()?;
        let mut seen: HashSet<String> = existing.iter().map(|r| r.signature.clone()).collect();
        let mut before: Option<String> = existing.last().map(|r| r.signature.clone());

        match &before {
            Some(cursor) => logger::info(
                LogTag::Signatures,
                &format!(
                    "[{}] Resuming {} with {} stored signatures, cursor {}",
                    label,
                    window.describe(),
                    existing.len(),
                    cursor
                ),
            ),
            None => logger::info(
                LogTag::Signatures,
                &format!("[{}] Collecting signatures for {}", label, window.describe()),
            ),
        }

        loop {
            if self.budget.is_exhausted() {
                logger::warning(
                    LogTag::Signatures,
                    &format!(
                        "[{}] Time budget exhausted after {} pages; stopping with {} new signatures",
                        label, summary.pages, summary.appended
                    ),
                );
                summary.stop = StopReason::BudgetExhausted;
                break;
            }

            let page = self
                .client
                .get_signatures_for_address(self.program_address, self.page_limit, before.as_deref())
                .await?;
            summary.pages += 1;

            if page.is_empty() {
                summary.stop = StopReason::HistoryExhausted;
                break;
            }

            let mut passed_start = false;
            for item in &page {
                let Some(block_time) = item.block_time else {
                    summary.skipped_no_block_time += 1;
                    continue;
                };

                match window.position(block_time) {
                    WindowPosition::Below => {
                        passed_start = true;
                        break;
                    }
                    WindowPosition::Above => summary.skipped_after_window += 1,
                    WindowPosition::Inside => {
                        if seen.insert(item.signature.clone()) {
                            store.append(&SignatureRecord {
                                signature: item.signature.clone(),
                                block_time,
                            })?;
                            summary.appended += 1;
                        } else {
                            summary.duplicates += 1;
                        }
                    }
                }
            }

            logger::debug(
                LogTag::Signatures,
                &format!(
                    "[{}] Page {}: {} items, {} stored so far",
                    label,
                    summary.pages,
                    page.len(),
                    summary.appended
                ),
            );

            if passed_start {
                summary.stop = StopReason::ReachedWindowStart;
                break;
            }

            before = page.last().map(|item| item.signature.clone());
        }

        logger::info(
            LogTag::Signatures,
            &format!(
                "[{}] {}: {} new signatures over {} pages ({} duplicates, {} without block time)",
                label,
                summary.stop,
                summary.appended,
                summary.pages,
                summary.duplicates,
                summary.skipped_no_block_time
            ),
        );

        Ok(summary)
    }
}
