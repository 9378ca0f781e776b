//! swapscope logging
//!
//! `logger::{error, warning, info, debug, verbose}(tag, message)` from
//! anywhere in the crate. DEBUG lines are gated per subsystem by the
//! `--debug-rpc`, `--debug-collector` and `--debug-aggregate` switches;
//! `--verbose` opens everything and `--quiet` keeps only warnings and errors.
//! `--no-console` leaves only the file sink.
//!
//! ```rust,ignore
//! use swapscope::logger::{self, LogTag};
//!
//! logger::warning(LogTag::Signatures, "Time budget exhausted");
//! logger::debug(LogTag::Rpc, "rotating to https://..."); // only with --debug-rpc
//! ```
//!
//! Before `init` runs the defaults apply (INFO, console only), which is what
//! tests and library callers get.

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

use std::path::Path;

/// Install the CLI-derived configuration and open the daily log file
///
/// `logs_dir` must already exist.
pub fn init(config: LoggerConfig, logs_dir: Option<&Path>) {
    config::set_logger_config(config);

    if let Some(dir) = logs_dir {
        file::init_file_logging(dir);
    }
}

/// Always printed
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Degraded but continuing: retries, skipped transactions, exhausted budget
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Progress and summaries
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Printed only when the tag's `--debug-<key>` flag is set
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Raw payload tracing, `--verbose` only
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Flush the log file; call before exiting
pub fn flush() {
    file::flush_file_logging();
}
