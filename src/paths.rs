//! Centralized path resolution for swapscope
//!
//! All durable artifacts are resolved through `DataPaths` so every phase
//! agrees on where checkpoints, the wallet map and reports live.
//!
//! ## Directory Structure
//!
//! ```text
//! <base>/
//! ├── data/
//! │ ├── signatures_h1.jsonl
//! │ ├── signatures_h2.jsonl
//! │ ├── transactions_h1.jsonl
//! │ ├── transactions_h2.jsonl
//! │ └── wallet_stats.json
//! ├── reports/
//! │ ├── top_wallets.csv
//! │ └── top_wallets.json
//! └── logs/
//!   └── swapscope_<date>.log
//! ```
//!
//! The base directory is `--data-dir` when given, otherwise the platform
//! data location:
//! - **macOS**: `~/Library/Application Support/SwapScope/`
//! - **Windows**: `%LOCALAPPDATA%\SwapScope\`
//! - **Linux**: `$XDG_DATA_HOME/SwapScope/` (fallback `~/.local/share/SwapScope/`)

use std::path::{Path, PathBuf};

use crate::errors::SwapScopeError;

const APP_DIR: &str = "SwapScope";

/// Resolves the default base directory for all swapscope data
pub fn default_base_directory() -> PathBuf {
    if let Some(dir) = dirs::data_local_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(dir) = dirs::data_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(APP_DIR);
    }

    PathBuf::from(APP_DIR)
}

#[derive(Debug, Clone)]
pub struct DataPaths {
    base: PathBuf,
}

impl DataPaths {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base_directory(&self) -> &Path {
        &self.base
    }

    /// Checkpoint logs and the wallet map
    pub fn data_directory(&self) -> PathBuf {
        self.base.join("data")
    }

    pub fn logs_directory(&self) -> PathBuf {
        self.base.join("logs")
    }

    pub fn reports_directory(&self) -> PathBuf {
        self.base.join("reports")
    }

    /// Default location of config.toml when `--config` is not given
    pub fn config_path(&self) -> PathBuf {
        self.base.join("config.toml")
    }

    /// Signature log for one half-window (`label` is "h1" or "h2")
    pub fn signatures_log(&self, label: &str) -> PathBuf {
        self.data_directory().join(format!("signatures_{}.jsonl", label))
    }

    /// Transaction log for one half-window
    pub fn transactions_log(&self, label: &str) -> PathBuf {
        self.data_directory().join(format!("transactions_{}.jsonl", label))
    }

    pub fn wallet_stats_path(&self) -> PathBuf {
        self.data_directory().join("wallet_stats.json")
    }

    pub fn report_csv_path(&self) -> PathBuf {
        self.reports_directory().join("top_wallets.csv")
    }

    pub fn report_json_path(&self) -> PathBuf {
        self.reports_directory().join("top_wallets.json")
    }

    /// Create every directory the pipeline writes into
    pub fn ensure_all_directories(&self) -> Result<(), SwapScopeError> {
        for dir in [
            self.data_directory(),
            self.logs_directory(),
            self.reports_directory(),
        ] {
            std::fs::create_dir_all(&dir).map_err(|e| SwapScopeError::io_error(&dir, e))?;
        }
        Ok(())
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::new(default_base_directory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let paths = DataPaths::new("/tmp/swapscope-test");
        assert_eq!(
            paths.signatures_log("h1"),
            PathBuf::from("/tmp/swapscope-test/data/signatures_h1.jsonl")
        );
        assert_eq!(
            paths.transactions_log("h2"),
            PathBuf::from("/tmp/swapscope-test/data/transactions_h2.jsonl")
        );
        assert_eq!(
            paths.report_csv_path(),
            PathBuf::from("/tmp/swapscope-test/reports/top_wallets.csv")
        );
    }

    #[test]
    fn test_ensure_all_directories() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path().join("nested"));
        paths.ensure_all_directories().unwrap();
        assert!(paths.data_directory().is_dir());
        assert!(paths.logs_directory().is_dir());
        assert!(paths.reports_directory().is_dir());
    }

    #[test]
    fn test_default_base_is_named() {
        assert!(default_base_directory().ends_with(APP_DIR));
    }
}
