//! Rule-driven scanner
//!
//! Pull-based tokenizer built from three parts:
//! - rule table: named, ordered lists of anchored regexes, first match wins
//! - cursor: consumed prefix, remaining suffix and absolute position
//! - lookahead queue: matched but not yet consumed tokens
//!
//! ```
//! use lexscan_core::Scanner;
//!
//! let mut scanner = Scanner::new("//foo/bar.com");
//! scanner
//!     .add_rule("slash", r"^/")?
//!     .add_rule("dot", r"^\.")?
//!     .add_rule("text", r"^\w+")?;
//!
//! let kinds: Vec<String> = scanner.scan_all()?.into_iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, ["slash", "slash", "text", "slash", "text", "dot", "text"]);
//! assert!(scanner.eos());
//! # Ok::<(), lexscan_core::ScanError>(())
//! ```

pub mod core;
pub mod error;
pub mod pattern;
pub mod rules;
pub mod scanner;
pub mod token;

pub use self::core::{Cursor, LookaheadQueue, SourcePosition, SourceSpan};
pub use error::{ErrorKind, ScanError, ScanResult};
pub use pattern::{IntoPatterns, Pattern, PatternId};
pub use rules::{Rule, RuleSpec, RuleTable};
pub use scanner::{Scanner, ScannerBuilder, Tokens};
pub use token::{DefaultTokenFactory, Match, Token, TokenFactory};
