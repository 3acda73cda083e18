//! Scanning tool output for error markers.
//!
//! The tool reports cache-target rejections as colored stderr lines
//! containing the literal marker `[error]`. Scanning is pure: find the
//! marker line, strip terminal escape sequences and control bytes, trim.

use std::sync::LazyLock;

use regex::Regex;

/// Literal marker the tool prints on rejection lines.
pub const ERROR_MARKER: &str = "[error]";

static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("valid escape pattern"));

/// Return the cleaned first `[error]` line from `lines`, if any.
///
/// Lines without the marker are informational and ignored.
pub fn find_error_line(lines: &[String]) -> Option<String> {
    lines
        .iter()
        .find(|line| line.contains(ERROR_MARKER))
        .map(|line| clean_error_line(line))
}

/// Strip ANSI escape sequences, cut at the first remaining control byte, and
/// trim surrounding whitespace.
pub fn clean_error_line(line: &str) -> String {
    let stripped = ANSI_ESCAPE.replace_all(line, "");
    let cut = stripped
        .find(|c: char| c.is_control())
        .map_or(stripped.as_ref(), |idx| &stripped[..idx]);
    cut.trim().to_string()
}
