/// File sink for the logger
///
/// One append-only file per day under the logs directory. Until
/// `init_file_logging` succeeds every write is a no-op.
use chrono::Local;
use once_cell::sync::Lazy;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

/// Open today's log file inside `logs_dir`
pub fn init_file_logging(logs_dir: &Path) {
    let file_name = format!("swapscope_{}.log", Local::now().format("%Y-%m-%d"));
    let path = logs_dir.join(file_name);

    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            if let Ok(mut slot) = LOG_FILE.lock() {
                *slot = Some(file);
            }
        }
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
        }
    }
}

/// Append one line to the log file, if one is open
pub fn write_to_file(line: &str) {
    if let Ok(mut slot) = LOG_FILE.lock() {
        if let Some(file) = slot.as_mut() {
            let _ = writeln!(file, "{}", line);
        }
    }
}

pub fn flush_file_logging() {
    if let Ok(mut slot) = LOG_FILE.lock() {
        if let Some(file) = slot.as_mut() {
            let _ = file.flush();
        }
    }
}
