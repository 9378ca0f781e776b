//! Log tags identify the subsystem that emitted a message
//!
//! Each tag maps to a `--debug-<key>` flag that unlocks its DEBUG output.

use colored::{ColoredString, Colorize};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Rpc,
    Store,
    Signatures,
    Transactions,
    Aggregate,
    Report,
}

impl LogTag {
    /// Key used by `--debug-<key>` flags
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Rpc => "rpc".to_string(),
            LogTag::Store => "store".to_string(),
            // Both collectors share one flag
            LogTag::Signatures | LogTag::Transactions => "collector".to_string(),
            LogTag::Aggregate => "aggregate".to_string(),
            LogTag::Report => "report".to_string(),
        }
    }

    /// Uncolored label written to the log file
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::System => "SYSTEM".to_string(),
            LogTag::Config => "CONFIG".to_string(),
            LogTag::Rpc => "RPC".to_string(),
            LogTag::Store => "STORE".to_string(),
            LogTag::Signatures => "SIGS".to_string(),
            LogTag::Transactions => "TX".to_string(),
            LogTag::Aggregate => "AGGREGATE".to_string(),
            LogTag::Report => "REPORT".to_string(),
        }
    }
}

impl LogTag {
    /// Padded, colored label for the console
    pub(super) fn console_label(&self, width: usize) -> ColoredString {
        let label = format!("{:<width$}", self.to_plain_string(), width = width);
        match self {
            LogTag::System => label.bright_yellow().bold(),
            LogTag::Config => label.bright_white().bold(),
            LogTag::Rpc => label.bright_cyan().bold(),
            LogTag::Store => label.bright_magenta().bold(),
            LogTag::Signatures => label.bright_blue().bold(),
            LogTag::Transactions => label.blue().bold(),
            LogTag::Aggregate => label.bright_green().bold(),
            LogTag::Report => label.green().bold(),
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
