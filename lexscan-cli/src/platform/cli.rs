//! CLI formatted output
//!
//! Error display with an excerpt of the scanned source.

use crate::CliError;

/// Lines shown before and after the failing line
const CONTEXT_LINES: usize = 2;

/// Print an error and, when it has a location, the surrounding source
pub fn print_error_with_source(e: &CliError, source: &str) {
    eprintln!("error: {}", e);

    if let Some((line, column)) = e.location() {
        eprint!("{}", render_source_context(source, line, column));
    }
}

/// Render the lines around `error_line` with a caret under `error_col`
///
/// Returns an empty string when the line is outside the source.
pub fn render_source_context(source: &str, error_line: usize, error_col: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let total_lines = lines.len();

    if error_line == 0 || error_line > total_lines {
        return String::new();
    }

    let start_line = error_line.saturating_sub(CONTEXT_LINES).max(1);
    let end_line = (error_line + CONTEXT_LINES).min(total_lines);
    let width = end_line.to_string().len();

    let separator = "-".repeat(width + 1);
    let mut out = format!("{}|--\n", separator);

    for line_idx in start_line..=end_line {
        out.push_str(&format!("{:>width$} | {}\n", line_idx, lines[line_idx - 1]));

        if line_idx == error_line {
            let marker = " ".repeat(error_col.saturating_sub(1));
            out.push_str(&format!("{:width$} | {}^\n", "", marker));
        }
    }

    out.push_str(&format!("{}|--\n", separator));
    out
}
