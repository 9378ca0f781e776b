//! Per-wallet statistics and the fold that builds them

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::attribution::attribute_wallet;
use super::delta::{token_delta, DeltaOutcome};
use crate::errors::SwapScopeError;
use crate::logger::{self, LogTag};
use crate::store::TransactionRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletStat {
    pub wallet: String,
    pub swaps: u64,
    /// Net tracked-mint balance change in base units
    pub pnl_base_units: i128,
    pub first_seen: i64,
    pub last_seen: i64,
}

impl WalletStat {
    fn new(wallet: &str, block_time: i64) -> Self {
        Self {
            wallet: wallet.to_string(),
            swaps: 0,
            pnl_base_units: 0,
            first_seen: block_time,
            last_seen: block_time,
        }
    }

    fn record(&mut self, delta: i128, block_time: i64) {
        self.swaps += 1;
        self.pnl_base_units += delta;
        self.first_seen = self.first_seen.min(block_time);
        self.last_seen = self.last_seen.max(block_time);
    }
}

/// Wallet address -> statistics, ordered by address
pub type WalletMap = BTreeMap<String, WalletStat>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationSummary {
    pub transactions: usize,
    pub folded: usize,
    pub unattributed: usize,
    pub duplicates: usize,
    pub no_meta: usize,
    pub malformed: usize,
}

/// Folds transaction records into a fresh wallet map
///
/// A signature is folded at most once per aggregator, so overlapping logs
/// never double count.
pub struct Aggregator {
    mint: String,
    wallets: WalletMap,
    seen: HashSet<String>,
    summary: AggregationSummary,
}

impl Aggregator {
    pub fn new(mint: &str) -> Self {
        Self {
            mint: mint.to_string(),
            wallets: WalletMap::new(),
            seen: HashSet::new(),
            summary: AggregationSummary::default(),
        }
    }

    pub fn fold(&mut self, record: &TransactionRecord) {
        self.summary.transactions += 1;

        if !self.seen.insert(record.signature.clone()) {
            self.summary.duplicates += 1;
            return;
        }

        let Some(wallet) = attribute_wallet(&record.payload) else {
            self.summary.unattributed += 1;
            logger::debug(
                LogTag::Aggregate,
                &format!("No wallet attributable for {}", record.signature),
            );
            return;
        };

        let outcome = token_delta(&record.payload, &wallet, &self.mint);
        match &outcome {
            DeltaOutcome::Computed(_) => {}
            DeltaOutcome::NoMeta => self.summary.no_meta += 1,
            DeltaOutcome::Malformed(reason) => {
                self.summary.malformed += 1;
                logger::debug(
                    LogTag::Aggregate,
                    &format!("Malformed balances in {}: {}", record.signature, reason),
                );
            }
        }

        self.wallets
            .entry(wallet.clone())
            .or_insert_with(|| WalletStat::new(&wallet, record.block_time))
            .record(outcome.value(), record.block_time);
        self.summary.folded += 1;
    }

    pub fn finish(self) -> (WalletMap, AggregationSummary) {
        (self.wallets, self.summary)
    }
}

/// Overwrite the persisted wallet map
///
/// Written to a sibling temp file and renamed so a crash never leaves a
/// half-written snapshot behind.
pub fn save_wallet_map(path: &Path, wallets: &WalletMap) -> Result<(), SwapScopeError> {
    let json = serde_json::to_string_pretty(wallets)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(|e| SwapScopeError::io_error(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| SwapScopeError::io_error(path, e))
}

pub fn load_wallet_map(path: &Path) -> Result<WalletMap, SwapScopeError> {
    let contents = std::fs::read_to_string(path).map_err(|e| SwapScopeError::io_error(path, e))?;
    serde_json::from_str(&contents)
        .map_err(|e| SwapScopeError::parse_error(format!("wallet map {}", path.display()), e.to_string()))
}
