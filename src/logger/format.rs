//! Console and file rendering of log lines
//!
//! Console lines look like `12:04:05 [RPC       ] [WARNING ] message`, with
//! long messages wrapped under the message column. The file gets the same
//! content without colors and with a full date.

use std::io::{stdout, ErrorKind, Write};

use chrono::Local;
use colored::Colorize;

use super::file::write_to_file;
use super::levels::LogLevel;
use super::tags::LogTag;

const TAG_WIDTH: usize = 10;
const LEVEL_WIDTH: usize = 8;
/// "HH:MM:SS " + "[tag] " + "[level] "
const PREFIX_WIDTH: usize = 9 + TAG_WIDTH + 3 + LEVEL_WIDTH + 3;
const LINE_WIDTH: usize = 145;

pub fn emit(tag: &LogTag, level: LogLevel, message: &str, console: bool) {
    let now = Local::now();
    let chunks = wrap_text(message, LINE_WIDTH.saturating_sub(PREFIX_WIDTH).max(40));

    if console {
        let head = format!(
            "{} [{}] [{}] ",
            now.format("%H:%M:%S").to_string().dimmed(),
            tag.console_label(TAG_WIDTH),
            level.console_label(LEVEL_WIDTH)
        );
        let indent = " ".repeat(PREFIX_WIDTH);
        for (i, chunk) in chunks.iter().enumerate() {
            let lead: &str = if i == 0 { &head } else { &indent };
            print_line(&format!("{}{}", lead, chunk));
        }
    }

    let stamp = now.format("%Y-%m-%d %H:%M:%S");
    for chunk in &chunks {
        write_to_file(&format!("{} [{}] [{}] {}", stamp, tag.to_plain_string(), level, chunk));
    }
}

/// Write to stdout; a closed pipe (`swapscope | head`) ends the process quietly
fn print_line(line: &str) {
    let mut out = stdout().lock();
    let result = writeln!(out, "{}", line).and_then(|_| out.flush());
    if let Err(e) = result {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        let _ = writeln!(std::io::stderr(), "Logger stdout error: {}", e);
    }
}

/// Greedy word wrap; words longer than `width` are split hard
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in raw.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(width.max(1)) {
                let piece: String = piece.iter().collect();
                let piece_len = piece.chars().count();

                if current_len > 0 && current_len + 1 + piece_len > width {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.push_str(&piece);
                current_len += piece_len;
            }
        }

        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_line_is_one_chunk() {
        assert_eq!(wrap_text("hello world", 40), vec!["hello world"]);
    }

    #[test]
    fn test_wraps_between_words() {
        assert_eq!(wrap_text("aaa bbb ccc ddd", 7), vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn test_long_word_is_split() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_newlines_are_kept() {
        assert_eq!(wrap_text("one\ntwo", 40), vec!["one", "two"]);
        assert_eq!(wrap_text("", 40), vec![""]);
    }
}
