//! Test helpers
//!
//! Builds scanners from JSON rule manifests, the way the CLI does

#![allow(dead_code)]

use lexscan::{scanner_from_rules, RulesInput, ScanResult, Scanner, ScannerConfig};

pub fn parse_rules(json: &str) -> RulesInput {
    serde_json::from_str(json).unwrap_or_else(|e| panic!("bad rules json: {e}\n{json}"))
}

pub fn scanner_from_json(input: &str, rules: &str) -> ScanResult<Scanner> {
    scanner_from_rules(input, parse_rules(rules), ScannerConfig::default())
}

/// Scan everything and return `(kind, value)` pairs
pub fn tokenize(scanner: &mut Scanner) -> Vec<(String, String)> {
    scanner
        .scan_all()
        .unwrap()
        .into_iter()
        .map(|t| (t.kind, t.value))
        .collect()
}

pub fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
