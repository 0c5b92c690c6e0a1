//! Test helpers
//!
//! Shared rule sets and invariant checks for the integration tests

#![allow(dead_code)]

use lexscan_core::{Scanner, Token};

/// Rules covering a small expression language; together they match any ASCII text
pub const EXPR_RULES: [(&str, &str); 8] = [
    ("newline", r"^\r?\n"),
    ("space", r"^[ \t]+"),
    ("number", r"^\d+(?:\.\d+)?"),
    ("ident", r"^[A-Za-z_]\w*"),
    ("string", r#"^"(?:[^"\\]|\\.)*""#),
    ("op", r"^(?:==|!=|<=|>=|[-+*/=<>!])"),
    ("punct", r"^[(){}\[\];,.]"),
    ("other", r"^[^\n]"),
];

pub fn expr_scanner(input: &str) -> Scanner {
    Scanner::with_rules(input, EXPR_RULES).unwrap()
}

pub fn url_scanner(input: &str) -> Scanner {
    Scanner::with_rules(input, [("slash", r"^/"), ("dot", r"^\."), ("text", r"^\w+")]).unwrap()
}

pub fn kinds(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.kind.as_str()).collect()
}

/// Cursor invariants that must hold between any two operations
pub fn assert_cursor_consistent(scanner: &Scanner) {
    let input = scanner.input();
    assert_eq!(
        format!("{}{}", scanner.consumed(), scanner.remaining()),
        input,
        "consumed + remaining must equal the input"
    );
    assert_eq!(scanner.position(), scanner.consumed().len());
    assert_eq!(scanner.bos(), scanner.consumed().is_empty());
    assert_eq!(
        scanner.eos(),
        scanner.remaining().is_empty() && scanner.queued() == 0
    );
}
