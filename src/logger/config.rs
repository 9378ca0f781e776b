/// Logger configuration shared by every log call
///
/// The configuration lives behind a global lock so library code can log
/// before (or without) `logger::init`; defaults apply until then.
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

use super::levels::LogLevel;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Most detailed level that may be printed
    pub min_level: LogLevel,
    /// Tags whose DEBUG output is enabled (`--debug-<key>`)
    pub debug_tags: HashSet<String>,
    /// Console output switch (`--no-console`); file output is unaffected
    pub console_enabled: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            console_enabled: true,
        }
    }
}

impl LoggerConfig {
    /// Build a config from the CLI switches
    pub fn from_flags(debug_keys: &[&str], verbose: bool, quiet: bool) -> Self {
        let mut config = Self::default();
        for key in debug_keys {
            config.debug_tags.insert(key.to_string());
        }
        if !config.debug_tags.is_empty() {
            config.min_level = LogLevel::Debug;
        }
        if verbose {
            config.min_level = LogLevel::Verbose;
        }
        if quiet {
            config.min_level = LogLevel::Warning;
        }
        config
    }

    /// Keep or drop the console sink
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.console_enabled = enabled;
        self
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Snapshot of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    match LOGGER_CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Replace the logger configuration
pub fn set_logger_config(config: LoggerConfig) {
    match LOGGER_CONFIG.write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags_levels() {
        let config = LoggerConfig::from_flags(&[], false, false);
        assert_eq!(config.min_level, LogLevel::Info);

        let config = LoggerConfig::from_flags(&["rpc"], false, false);
        assert_eq!(config.min_level, LogLevel::Debug);
        assert!(config.debug_tags.contains("rpc"));

        let config = LoggerConfig::from_flags(&["rpc"], true, false);
        assert_eq!(config.min_level, LogLevel::Verbose);

        // quiet wins over everything else
        let config = LoggerConfig::from_flags(&["rpc"], true, true);
        assert_eq!(config.min_level, LogLevel::Warning);
    }

    #[test]
    fn test_console_switch() {
        assert!(LoggerConfig::default().console_enabled);
        let config = LoggerConfig::from_flags(&[], false, false).with_console(false);
        assert!(!config.console_enabled);
        assert_eq!(config.min_level, LogLevel::Info);
    }
}
