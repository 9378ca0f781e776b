/// Level/tag filtering in front of the output sinks
use super::config::{get_logger_config, LoggerConfig};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Decide whether `config` lets a line through
///
/// - errors always pass
/// - verbose lines need `--verbose`
/// - anything more detailed than the threshold is dropped
/// - debug lines additionally need their tag's `--debug-<key>` flag, unless
///   the threshold is verbose
pub fn allows(config: &LoggerConfig, tag: &LogTag, level: LogLevel) -> bool {
    if level == LogLevel::Error {
        return true;
    }

    let key = tag.to_debug_key();
    let everything = config.min_level == LogLevel::Verbose;

    match level {
        LogLevel::Verbose => everything,
        LogLevel::Debug => {
            level <= config.min_level && (everything || config.debug_tags.contains(&key))
        }
        _ => level <= config.min_level,
    }
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    let config = get_logger_config();
    if !allows(&config, &tag, level) {
        return;
    }
    super::format::emit(&tag, level, message, config.console_enabled);
}
