//! Report output: CSV, JSON and a console table

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use super::ranking::{format_base_units, RankedRow};
use crate::collector::{format_unix, TimeWindow};
use crate::errors::SwapScopeError;

pub const CSV_HEADER: [&str; 5] = ["wallet", "swaps", "estimated_pnl", "first_seen", "last_seen"];

#[derive(Debug, Clone, Serialize)]
pub struct ReportWallet {
    pub rank: usize,
    pub wallet: String,
    pub swaps: u64,
    pub estimated_pnl: f64,
    pub pnl_base_units: String,
    pub first_seen: String,
    pub last_seen: String,
}

impl From<&RankedRow> for ReportWallet {
    fn from(row: &RankedRow) -> Self {
        Self {
            rank: row.rank,
            wallet: row.wallet.clone(),
            swaps: row.swaps,
            estimated_pnl: row.estimated_pnl,
            pnl_base_units: row.pnl_base_units.to_string(),
            first_seen: format_unix(row.first_seen),
            last_seen: format_unix(row.last_seen),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub generated_at: DateTime<Utc>,
    pub window_start: String,
    pub window_end: String,
    pub mint: String,
    pub wallets: Vec<ReportWallet>,
}

impl ReportDocument {
    pub fn new(rows: &[RankedRow], window: TimeWindow, mint: &str, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            window_start: format_unix(window.start),
            window_end: format_unix(window.end),
            mint: mint.to_string(),
            wallets: rows.iter().map(ReportWallet::from).collect(),
        }
    }
}

pub fn write_csv(path: &Path, rows: &[RankedRow], decimals: u8) -> Result<(), SwapScopeError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| SwapScopeError::export_error(path, e))?;

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| SwapScopeError::export_error(path, e))?;

    for row in rows {
        writer
            .write_record([
                row.wallet.clone(),
                row.swaps.to_string(),
                format_base_units(row.pnl_base_units, decimals),
                format_unix(row.first_seen),
                format_unix(row.last_seen),
            ])
            .map_err(|e| SwapScopeError::export_error(path, e))?;
    }

    writer.flush().map_err(|e| SwapScopeError::export_error(path, e))
}

pub fn write_json(path: &Path, document: &ReportDocument) -> Result<(), SwapScopeError> {
    let json = serde_json::to_string_pretty(document)?;
    std::fs::write(path, json).map_err(|e| SwapScopeError::export_error(path, e))
}

#[derive(Tabled)]
struct ConsoleRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Wallet")]
    wallet: String,
    #[tabled(rename = "Swaps")]
    swaps: u64,
    #[tabled(rename = "Est. PnL")]
    pnl: String,
    #[tabled(rename = "First Seen")]
    first_seen: String,
    #[tabled(rename = "Last Seen")]
    last_seen: String,
}

/// Render the first `limit` rows as a table for the terminal
pub fn render_table(rows: &[RankedRow], limit: usize) -> String {
    let display_rows: Vec<ConsoleRow> = rows
        .iter()
        .take(limit)
        .map(|row| ConsoleRow {
            rank: row.rank,
            wallet: row.wallet.clone(),
            swaps: row.swaps,
            pnl: format!("{:+.2}", row.estimated_pnl),
            first_seen: format_unix(row.first_seen),
            last_seen: format_unix(row.last_seen),
        })
        .collect();

    Table::new(display_rows)
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}
