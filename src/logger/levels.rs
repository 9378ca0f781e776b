use colored::{ColoredString, Colorize};

/// Severity of a log line, from most to least important
///
/// The derive order matters: `level <= threshold` means "detailed enough to
/// print" everywhere in the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    /// Needs a matching `--debug-<key>` flag (or `--verbose`)
    Debug,
    /// Needs `--verbose`
    Verbose,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Verbose => "VERBOSE",
        }
    }

    /// Padded, colored label for the console
    pub(super) fn console_label(&self, width: usize) -> ColoredString {
        let label = format!("{:<width$}", self.as_str(), width = width);
        match self {
            LogLevel::Error => label.bright_red().bold(),
            LogLevel::Warning => label.bright_yellow().bold(),
            LogLevel::Info => label.white().bold(),
            LogLevel::Debug | LogLevel::Verbose => label.dimmed(),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
