/// Command-line argument handling for swapscope
///
/// All flags are parsed once in `main` with clap and passed down by
/// reference. Debug switches map onto logger tags: `--debug-rpc` enables
/// debug output for `LogTag::Rpc`, `--debug-collector` for both collectors,
/// `--debug-aggregate` for the aggregation engine.
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::logger::{self, LogTag, LoggerConfig};
use crate::paths::DataPaths;

/// Which part of the pipeline to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Phase {
    /// Collect, aggregate, then report
    All,
    /// Signature and transaction collection only
    Collect,
    /// Rebuild the wallet map from the transaction logs
    Aggregate,
    /// Rank the persisted wallet map and write reports
    Report,
}

impl Phase {
    pub fn runs_collection(&self) -> bool {
        matches!(self, Phase::All | Phase::Collect)
    }

    pub fn runs_aggregation(&self) -> bool {
        matches!(self, Phase::All | Phase::Aggregate)
    }

    pub fn runs_report(&self) -> bool {
        matches!(self, Phase::All | Phase::Report)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "swapscope")]
#[command(version, about = "Resumable swap-history collector and wallet ranking for a Solana program")]
pub struct Args {
    /// Path to config.toml (default: <data-dir>/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base directory for checkpoints, reports and logs
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Pipeline phase to run
    #[arg(long, value_enum, default_value_t = Phase::All)]
    pub phase: Phase,

    /// Probe every RPC endpoint with getHealth before starting
    #[arg(long)]
    pub check_endpoints: bool,

    /// Debug output for RPC calls, retries and rotation
    #[arg(long)]
    pub debug_rpc: bool,

    /// Debug output for signature and transaction collection
    #[arg(long)]
    pub debug_collector: bool,

    /// Debug output for aggregation
    #[arg(long)]
    pub debug_aggregate: bool,

    /// Trace everything, including raw RPC payloads
    #[arg(short, long)]
    pub verbose: bool,

    /// Only warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write log lines to the log file only
    #[arg(long)]
    pub no_console: bool,
}

impl Args {
    /// Logger debug keys enabled by the `--debug-*` flags
    pub fn debug_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.debug_rpc {
            keys.push("rpc");
        }
        if self.debug_collector {
            keys.push("collector");
            keys.push("store");
        }
        if self.debug_aggregate {
            keys.push("aggregate");
        }
        keys
    }

    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig::from_flags(&self.debug_keys(), self.verbose, self.quiet)
            .with_console(!self.no_console)
    }

    pub fn data_paths(&self) -> DataPaths {
        match &self.data_dir {
            Some(dir) => DataPaths::new(dir.clone()),
            None => DataPaths::default(),
        }
    }

    pub fn config_path(&self, paths: &DataPaths) -> PathBuf {
        self.config.clone().unwrap_or_else(|| paths.config_path())
    }
}

/// Log which debug modes are active
pub fn print_debug_info(args: &Args) {
    let keys = args.debug_keys();
    if keys.is_empty() && !args.verbose {
        return;
    }
    logger::info(
        LogTag::System,
        &format!(
            "Debug modes: [{}]{}",
            keys.join(", "),
            if args.verbose { " + verbose" } else { "" }
        ),
    );
}
