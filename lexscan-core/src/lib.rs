//! lexscan Core - incremental, rule-driven lexical scanner (pure logic, no IO)
//!
//! Callers register named rules of anchored regular expressions and pull
//! tokens one at a time, with as much lookahead as they ask for.
//!
//! Configuration is passed explicitly via parameters, not via global state.

pub mod kit;

// Re-export common types
pub use kit::scanner::{
    DefaultTokenFactory, ErrorKind, IntoPatterns, Match, Pattern, PatternId, Rule, RuleSpec,
    RuleTable, ScanError, ScanResult, Scanner, ScannerBuilder, SourcePosition, SourceSpan, Token,
    TokenFactory, Tokens,
};

// Re-export config types from lexscan-config
pub use lexscan_config::{Phase, RulesInput, ScannerConfig};
