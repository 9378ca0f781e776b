//! Report builder
//!
//! Pure with respect to the wallet map: ranks it, writes the CSV and JSON
//! artifacts and renders the console table. Nothing here touches the network
//! or the checkpoint logs.

pub mod ranking;
pub mod writer;

use std::path::Path;

use chrono::Utc;

pub use ranking::{compare_stats, format_base_units, rank_wallets, scale_amount, RankedRow};
pub use writer::{render_table, write_csv, write_json, ReportDocument, ReportWallet};

use crate::aggregate::WalletMap;
use crate::collector::TimeWindow;
use crate::errors::SwapScopeError;
use crate::logger::{self, LogTag};

/// Inputs that shape a report besides the wallet map
#[derive(Debug, Clone)]
pub struct ReportOptions<'a> {
    pub window: TimeWindow,
    pub mint: &'a str,
    pub decimals: u8,
    pub top_n: usize,
}

/// Rank the map and write both report files
pub fn build_report(
    wallets: &WalletMap,
    options: &ReportOptions<'_>,
    csv_path: &Path,
    json_path: &Path,
) -> Result<Vec<RankedRow>, SwapScopeError> {
    let rows = rank_wallets(wallets, options.top_n, options.decimals);

    write_csv(csv_path, &rows, options.decimals)?;
    let document = ReportDocument::new(&rows, options.window, options.mint, Utc::now());
    write_json(json_path, &document)?;

    logger::info(
        LogTag::Report,
        &format!(
            "Ranked {} of {} wallets → {} and {}",
            rows.len(),
            wallets.len(),
            csv_path.display(),
            json_path.display()
        ),
    );

    Ok(rows)
}
