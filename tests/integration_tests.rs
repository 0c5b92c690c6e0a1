//! Integration tests - scanners built from serialized rules

mod common;
use common::{pairs, parse_rules, scanner_from_json, tokenize};

use lexscan::{scanner_from_rules, ErrorKind, RulesInput, ScannerConfig};

#[test]
fn test_map_rules_keep_declaration_order() {
    // "word" would swallow "if" if the map were reordered alphabetically
    let mut scanner = scanner_from_json(
        "if x",
        r#"{ "kw": "^if\\b", "word": "^\\w+", "space": "^\\s+" }"#,
    )
    .unwrap();
    assert_eq!(
        tokenize(&mut scanner),
        pairs(&[("kw", "if"), ("space", " "), ("word", "x")])
    );
}

#[test]
fn test_list_rules_with_aliases() {
    let mut scanner = scanner_from_json(
        "a1",
        r#"[
            { "type": "letter", "regex": "^[a-z]" },
            { "name": "digit", "patterns": ["^\\d"] }
        ]"#,
    )
    .unwrap();
    assert_eq!(
        tokenize(&mut scanner),
        pairs(&[("letter", "a"), ("digit", "1")])
    );
}

#[test]
fn test_multiple_patterns_per_rule() {
    let mut scanner = scanner_from_json(
        "'a' \"b\"",
        r#"{ "string": ["^'([^']*)'", "^\"([^\"]*)\""], "space": "^ " }"#,
    )
    .unwrap();
    // default factory prefers the first capture group
    assert_eq!(
        tokenize(&mut scanner),
        pairs(&[("string", "a"), ("space", " "), ("string", "b")])
    );
    assert_eq!(scanner.consumed(), "'a' \"b\"");
}

#[test]
fn test_duplicate_map_key_replaces_in_place() {
    let rules = parse_rules(r#"{ "a": "^a", "b": "^b", "a": "^a+" }"#);
    let RulesInput::Map(map) = &rules else {
        panic!("expected map form");
    };
    assert_eq!(map.0.len(), 2);
    assert_eq!(map.0[0].0, "a");

    let mut scanner = scanner_from_rules("aab", rules, ScannerConfig::default()).unwrap();
    assert_eq!(tokenize(&mut scanner), pairs(&[("a", "aa"), ("b", "b")]));
}

#[test]
fn test_invalid_pattern_names_rule() {
    let err = scanner_from_json("x", r#"{ "ok": "^x", "broken": "^(" }"#).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidPattern { .. }));
    assert_eq!(err.rule.as_deref(), Some("broken"));
}

#[test]
fn test_unanchored_serialized_rule_fails_on_use() {
    let mut scanner = scanner_from_json("abc", r#"{ "word": "\\w+" }"#).unwrap();
    let err = scanner.scan().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidPattern { .. }));
    assert_eq!(err.rule.as_deref(), Some("word"));
    assert_eq!(scanner.position(), 0);
}

#[test]
fn test_snippet_len_from_config() {
    let config: ScannerConfig = serde_json::from_str(r#"{ "snippet_len": 3 }"#).unwrap();
    let rules = parse_rules(r#"{ "empty": "^x*" }"#);
    let mut scanner = scanner_from_rules("abcdef", rules, config).unwrap();
    let err = scanner.scan().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnsafeZeroWidthMatch { .. }));
    assert_eq!(err.snippet.as_deref(), Some("abc"));
}

#[test]
fn test_parser_style_lookahead() {
    // a tiny recursive-descent consumer: `name = value;` pairs
    let mut scanner = scanner_from_json(
        "a = 1;\nbb = 22;",
        r#"{ "ws": "^\\s+", "ident": "^[a-z]+", "num": "^\\d+", "eq": "^=", "semi": "^;" }"#,
    )
    .unwrap();

    let mut assignments = Vec::new();
    loop {
        scanner.skip_kinds(&["ws"]).unwrap();
        let Some(name) = scanner.scan().unwrap() else {
            break;
        };
        assert!(name.is("ident"));
        scanner.skip_kinds(&["ws"]).unwrap();
        assert!(scanner.scan().unwrap().unwrap().is("eq"));
        scanner.skip_kinds(&["ws"]).unwrap();
        let value = scanner.scan().unwrap().unwrap();
        assert_eq!(scanner.peek().unwrap().map(|t| t.kind.as_str()), Some("semi"));
        scanner.scan().unwrap();
        assignments.push((name.value, value.value));
    }
    assert_eq!(
        assignments,
        [("a".to_string(), "1".to_string()), ("bb".to_string(), "22".to_string())]
    );
    assert!(scanner.eos());
}
