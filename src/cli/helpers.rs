//! Shared helper functions for shell output
//!
//! Small formatting pieces used by more than one command.

use console::style;

/// Width of the dashed part of a separator line
pub const SEPARATOR_WIDTH: usize = 50;

/// A `+-----+` separator line, magenta when colors are enabled
pub fn separator() -> String {
    style(format!("+{}+", "-".repeat(SEPARATOR_WIDTH)))
        .magenta()
        .to_string()
}

/// "N result(s)" summary line
pub fn result_count(count: usize) -> String {
    style(format!("{} result(s)", count)).yellow().to_string()
}

/// Escape a value for a single TSV field
///
/// Tabs and newlines would break the record structure, so they become spaces.
pub fn escape_tsv(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}

/// Split a command line into whitespace-separated words
pub fn split_words(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}
