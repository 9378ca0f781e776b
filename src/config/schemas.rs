/// config.toml sections, each declared once with its defaults
///
/// Each section maps to a `[table]` in config.toml. Fields that have no
/// sensible default (endpoints, window bounds) default to empty values and
/// are rejected by validation.
use crate::config_struct;

/// Jupiter aggregator v6 program
pub const DEFAULT_PROGRAM_ADDRESS: &str = "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4";

/// USDC mint on Solana mainnet
pub const DEFAULT_STABLE_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

// ============================================================================
// RPC CONFIGURATION
// ============================================================================

config_struct! {
    /// RPC endpoint configuration
    pub struct RpcConfig {
        /// Ordered list of RPC URLs; rotated on every retryable failure
        urls: Vec<String> = Vec::new(),

        /// Base delay of the exponential backoff (milliseconds)
        base_delay_ms: u64 = 500,

        /// Backoff ceiling (milliseconds)
        max_backoff_ms: u64 = 30_000,

        /// Fixed pause between transaction resolutions (milliseconds)
        throttle_ms: u64 = 150,
    }
}

// ============================================================================
// COLLECTION CONFIGURATION
// ============================================================================

config_struct! {
    /// Signature / transaction collection configuration
    pub struct CollectionConfig {
        /// Program whose history is walked
        program_address: String = DEFAULT_PROGRAM_ADDRESS.to_string(),

        /// Window start, RFC 3339 (inclusive)
        start: String = String::new(),

        /// Window end, RFC 3339 (inclusive)
        end: String = String::new(),

        /// Wall-clock budget for the whole run
        time_budget_minutes: u64 = 60,

        /// Signatures requested per getSignaturesForAddress page
        page_limit: usize = 1000,

        /// getTransaction encoding ("json" or "jsonParsed")
        transaction_encoding: String = "json".to_string(),
    }
}

// ============================================================================
// AGGREGATION CONFIGURATION
// ============================================================================

config_struct! {
    /// Balance-delta aggregation configuration
    pub struct AggregationConfig {
        /// Stablecoin mint whose balance deltas approximate PnL
        stable_mint: String = DEFAULT_STABLE_MINT.to_string(),

        /// Decimal places of the stablecoin mint
        stable_decimals: u8 = 6,
    }
}

// ============================================================================
// REPORT CONFIGURATION
// ============================================================================

config_struct! {
    /// Ranked output configuration
    pub struct ReportConfig {
        /// Rows written to the CSV / JSON artifacts
        top_n: usize = 100,

        /// Rows printed to the console table
        console_rows: usize = 20,
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration loaded from config.toml
    pub struct Config {
        rpc: RpcConfig = RpcConfig::default(),
        collection: CollectionConfig = CollectionConfig::default(),
        aggregation: AggregationConfig = AggregationConfig::default(),
        report: ReportConfig = ReportConfig::default(),
    }
}
