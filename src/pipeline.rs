//! Pipeline orchestration
//!
//! Collection walks the two half-windows newest first (`h2`, then `h1`); each
//! half collects signatures into its own log, then resolves them into its own
//! transaction log. Aggregation folds both transaction logs into a fresh
//! wallet map, and the report ranks that map.

use std::path::PathBuf;

use crate::aggregate::{aggregate_logs, load_wallet_map, AggregationSummary, WalletMap};
use crate::collector::{
    SignatureCollector, SignaturePassSummary, TimeBudget, TimeWindow, TransactionCollector,
    TransactionPassSummary,
};
use crate::config::Settings;
use crate::errors::SwapScopeError;
use crate::logger::{self, LogTag};
use crate::paths::DataPaths;
use crate::report::{build_report, render_table, RankedRow, ReportOptions};
use crate::rpc::RpcClient;
use crate::store::{CheckpointedStore, SignatureRecord, TransactionRecord};

/// Checkpoint suffixes in processing order
pub const HALF_LABELS: [&str; 2] = ["h2", "h1"];

/// Half-windows in processing order, labelled by their checkpoint suffix
pub fn half_windows(window: TimeWindow) -> [(&'static str, TimeWindow); 2] {
    let (h1, h2) = window.split_halves();
    [(HALF_LABELS[0], h2), (HALF_LABELS[1], h1)]
}

/// Transaction logs folded by aggregation, in processing order
pub fn transaction_logs(paths: &DataPaths) -> Vec<PathBuf> {
    HALF_LABELS
        .iter()
        .map(|label| paths.transactions_log(label))
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct CollectionSummary {
    pub signatures: Vec<SignaturePassSummary>,
    pub transactions: Vec<TransactionPassSummary>,
    pub budget_exhausted: bool,
}

/// Collect signatures and transactions for both half-windows
///
/// Returns early (successfully) once the budget is spent; what was
/// checkpointed so far stays on disk for the next run.
pub async fn run_collection(
    client: &RpcClient,
    settings: &Settings,
    paths: &DataPaths,
    budget: &TimeBudget,
) -> Result<CollectionSummary, SwapScopeError> {
    let mut summary = CollectionSummary::default();

    logger::info(
        LogTag::System,
        &format!(
            "Collecting {} for {} (budget {}s)",
            settings.window.describe(),
            settings.program_address,
            budget.limit().as_secs()
        ),
    );

    for (label, window) in half_windows(settings.window) {
        if window.is_empty() {
            logger::debug(LogTag::Signatures, &format!("[{}] Empty half-window, skipping", label));
            continue;
        }

        let mut signature_store: CheckpointedStore<SignatureRecord> =
            CheckpointedStore::new(paths.signatures_log(label));
        let signature_pass = SignatureCollector::new(
            client,
            &settings.program_address,
            settings.page_limit,
            budget,
        )
        .collect(label, window, &mut signature_store)
        .await?;
        let signatures_partial = signature_pass.stop.is_partial();
        summary.signatures.push(signature_pass);

        let signatures = signature_store.load_all()?;
        let mut transaction_store: CheckpointedStore<TransactionRecord> =
            CheckpointedStore::new(paths.transactions_log(label));
        let transaction_pass = TransactionCollector::new(
            client,
            &settings.transaction_encoding,
            settings.throttle,
            budget,
        )
        .collect(label, &signatures, &mut transaction_store)
        .await?;
        let transactions_partial = transaction_pass.stop.is_partial();
        summary.transactions.push(transaction_pass);

        if signatures_partial || transactions_partial {
            summary.budget_exhausted = true;
            logger::warning(
                LogTag::System,
                "Time budget exhausted; collection is partial and will resume on the next run",
            );
            break;
        }
    }

    Ok(summary)
}

/// Rebuild and persist the wallet map from every transaction log
pub fn run_aggregation(
    settings: &Settings,
    paths: &DataPaths,
) -> Result<(WalletMap, AggregationSummary), SwapScopeError> {
    aggregate_logs(
        &transaction_logs(paths),
        &settings.stable_mint,
        &paths.wallet_stats_path(),
    )
}

/// Rank the wallet map (loading the persisted one when none is given) and
/// write the report files
pub fn run_report(
    settings: &Settings,
    paths: &DataPaths,
    wallets: Option<WalletMap>,
    show_table: bool,
) -> Result<Vec<RankedRow>, SwapScopeError> {
    let wallets = match wallets {
        Some(wallets) => wallets,
        None => load_wallet_map(&paths.wallet_stats_path())?,
    };

    let options = ReportOptions {
        window: settings.window,
        mint: &settings.stable_mint,
        decimals: settings.stable_decimals,
        top_n: settings.top_n,
    };
    let rows = build_report(
        &wallets,
        &options,
        &paths.report_csv_path(),
        &paths.report_json_path(),
    )?;

    if show_table && !rows.is_empty() {
        println!("{}", render_table(&rows, settings.console_rows));
    }

    Ok(rows)
}
