//! Command line tokenizer
//!
//! Tokens are separated by runs of spaces. Token 0 is the command name,
//! parameters are numbered from 1. Input lines only ever hold printable
//! ASCII, so a space is the only whitespace that can occur.

/// First token of the line, or `""` for a blank line.
pub fn command_name(line: &str) -> &str {
    line.split_whitespace().next().unwrap_or("")
}

/// Parameter `index` (1-based) of the line, or `None` if absent.
///
/// The returned slice borrows the line; its length is the parameter length.
pub fn parameter(line: &str, index: usize) -> Option<&str> {
    if index == 0 {
        return None;
    }
    line.split_whitespace().nth(index)
}

/// Number of parameters after the command name.
pub fn parameter_count(line: &str) -> usize {
    line.split_whitespace().skip(1).count()
}
