//! Wallet ranking

use std::cmp::Ordering;

use serde::Serialize;

use crate::aggregate::{WalletMap, WalletStat};

/// Read-only projection of a `WalletStat` for output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    pub rank: usize,
    pub wallet: String,
    pub swaps: u64,
    pub pnl_base_units: i128,
    pub estimated_pnl: f64,
    pub first_seen: i64,
    pub last_seen: i64,
}

/// Ordering: swaps desc, then PnL desc, then wallet address asc
pub fn compare_stats(a: &WalletStat, b: &WalletStat) -> Ordering {
    b.swaps
        .cmp(&a.swaps)
        .then_with(|| b.pnl_base_units.cmp(&a.pnl_base_units))
        .then_with(|| a.wallet.cmp(&b.wallet))
}

/// Rank all wallets and keep the first `top_n`
pub fn rank_wallets(wallets: &WalletMap, top_n: usize, decimals: u8) -> Vec<RankedRow> {
    let mut stats: Vec<&WalletStat> = wallets.values().collect();
    stats.sort_by(|a, b| compare_stats(a, b));

    stats
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(idx, stat)| RankedRow {
            rank: idx + 1,
            wallet: stat.wallet.clone(),
            swaps: stat.swaps,
            pnl_base_units: stat.pnl_base_units,
            estimated_pnl: scale_amount(stat.pnl_base_units, decimals),
            first_seen: stat.first_seen,
            last_seen: stat.last_seen,
        })
        .collect()
}

/// Base units -> decimal token amount
pub fn scale_amount(base_units: i128, decimals: u8) -> f64 {
    base_units as f64 / 10f64.powi(decimals as i32)
}

/// Base units -> exact decimal string with `decimals` fractional digits
pub fn format_base_units(base_units: i128, decimals: u8) -> String {
    let sign = if base_units < 0 { "-" } else { "" };
    let magnitude = base_units.unsigned_abs();
    if decimals == 0 {
        return format!("{}{}", sign, magnitude);
    }

    let width = decimals as usize;
    let (whole, fraction) = match 10u128.checked_pow(decimals as u32) {
        Some(scale) => (magnitude / scale, magnitude % scale),
        // wider than any u128 value: everything is fractional
        None => (0, magnitude),
    };
    format!("{}{}.{:0width$}", sign, whole, fraction, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(wallet: &str, swaps: u64, pnl: i128) -> (String, WalletStat) {
        (
            wallet.to_string(),
            WalletStat {
                wallet: wallet.to_string(),
                swaps,
                pnl_base_units: pnl,
                first_seen: 100,
                last_seen: 200,
            },
        )
    }

    #[test]
    fn test_rank_by_swaps_then_pnl() {
        let wallets: WalletMap = [stat("A", 5, 10), stat("B", 5, 20), stat("C", 3, 100)]
            .into_iter()
            .collect();

        let order: Vec<String> = rank_wallets(&wallets, 10, 6).into_iter().map(|r| r.wallet).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_full_tie_breaks_on_address() {
        let wallets: WalletMap = [stat("Zed", 1, 0), stat("Abe", 1, 0)].into_iter().collect();
        let rows = rank_wallets(&wallets, 10, 6);
        assert_eq!(rows[0].wallet, "Abe");
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[1].rank, 2);
    }

    #[test]
    fn test_exact_decimal_formatting() {
        assert_eq!(format_base_units(500_000, 6), "0.500000");
        assert_eq!(format_base_units(-1_000, 6), "-0.001000");
        assert_eq!(format_base_units(-1_250_000, 6), "-1.250000");
        assert_eq!(format_base_units(42, 0), "42");
        assert_eq!(format_base_units(0, 2), "0.00");
        // beyond f64's 53-bit mantissa
        assert_eq!(format_base_units(9_007_199_254_740_993, 6), "9007199254.740993");
        assert_eq!(format_base_units(i128::MIN, 0), "-170141183460469231731687303715884105728");
        assert_eq!(format_base_units(-5, 40), format!("-0.{}5", "0".repeat(39)));
    }

    #[test]
    fn test_top_n_and_scaling() {
        let wallets: WalletMap = [stat("A", 9, 500_000), stat("B", 2, -1_250_000), stat("C", 1, 0)]
            .into_iter()
            .collect();
        let rows = rank_wallets(&wallets, 2, 6);
        assert_eq!(rows.len(), 2);
        assert!((rows[0].estimated_pnl - 0.5).abs() < 1e-12);
        assert!((rows[1].estimated_pnl + 1.25).abs() < 1e-12);
    }
}
