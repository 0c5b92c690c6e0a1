//! lexscan - incremental, rule-driven lexical scanner
//!
//! # Architecture
//!
//! ```text
//! lexscan-config/  - Pure data (scanner config, serialized rules, log phases)
//! lexscan-core/    - Scanning engine (rules, match primitive, queue, cursor)
//! lexscan-cli/     - `lexscan` binary (tokenize a file from a JSON manifest)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use lexscan::Scanner;
//!
//! let mut scanner = Scanner::with_rules("//foo/bar.com", [
//!     ("slash", r"^/"),
//!     ("dot", r"^\."),
//!     ("text", r"^\w+"),
//! ])?;
//!
//! let kinds: Vec<String> = scanner.scan_all()?.into_iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, ["slash", "slash", "text", "slash", "text", "dot", "text"]);
//! # Ok::<(), lexscan::ScanError>(())
//! ```

// Re-export common types
pub use lexscan_config::{PatternSource, Phase, RuleDef, RulesInput, ScannerConfig};
pub use lexscan_core::{
    DefaultTokenFactory, ErrorKind, IntoPatterns, Match, Pattern, PatternId, Rule, RuleSpec,
    RuleTable, ScanError, ScanResult, Scanner, ScannerBuilder, SourcePosition, SourceSpan, Token,
    TokenFactory, Tokens,
};

/// Build a scanner from serialized rules
///
/// # Example
/// ```
/// let rules: lexscan::RulesInput = serde_json::from_str(r#"{"word": "^\\w+", "space": "^\\s+"}"#)?;
/// let mut scanner = lexscan::scanner_from_rules("hi there", rules, Default::default())?;
/// assert_eq!(scanner.scan_all()?.len(), 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn scanner_from_rules(
    input: impl Into<String>,
    rules: RulesInput,
    config: ScannerConfig,
) -> ScanResult<Scanner> {
    Ok(Scanner::builder(input).config(config).rules_input(rules)?.build())
}
