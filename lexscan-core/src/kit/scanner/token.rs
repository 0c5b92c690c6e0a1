//! Tokens and token construction

use std::collections::BTreeMap;
use std::ops::Range;

use serde::Serialize;

use super::core::SourceSpan;

/// Raw result of one successful pattern match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// Full matched text
    pub text: String,
    /// Absolute byte offset of the match in the input
    pub index: usize,
    /// Positional capture groups, starting at group 1
    pub captures: Vec<Option<String>>,
    /// Named capture groups that participated in the match
    pub groups: BTreeMap<String, String>,
    /// Absolute byte range, `[start, end)`
    pub range: Range<usize>,
    pub loc: SourceSpan,
}

impl Match {
    /// Capture group `i`; group 0 is the full match
    pub fn get(&self, i: usize) -> Option<&str> {
        if i == 0 {
            return Some(&self.text);
        }
        self.captures.get(i - 1).and_then(|c| c.as_deref())
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Token produced by a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Name of the rule that produced the token
    pub kind: String,
    pub value: String,
    pub matched: Match,
    pub range: Range<usize>,
    pub loc: SourceSpan,
    /// Named captures, keyed by group name
    pub extra: BTreeMap<String, String>,
}

impl Token {
    /// Build a token whose value is the full match
    pub fn new(kind: impl Into<String>, matched: Match) -> Self {
        let value = matched.text.clone();
        Self::with_value(kind, value, matched)
    }

    pub fn with_value(kind: impl Into<String>, value: impl Into<String>, matched: Match) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
            range: matched.range.clone(),
            loc: matched.loc,
            extra: matched.groups.clone(),
            matched,
        }
    }

    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Byte length of the matched text
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Token construction strategy
///
/// Called with the rule name and the raw match. The returned token is used
/// as is; implementations should keep `range` and `loc` from the match.
pub trait TokenFactory {
    fn build(&self, kind: &str, matched: Match) -> Token;
}

/// Value is capture group 1 when it participated, otherwise the full match
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTokenFactory;

impl TokenFactory for DefaultTokenFactory {
    fn build(&self, kind: &str, matched: Match) -> Token {
        match matched.get(1).map(str::to_owned) {
            Some(value) => Token::with_value(kind, value, matched),
            None => Token::new(kind, matched),
        }
    }
}

impl<F> TokenFactory for F
where
    F: Fn(&str, Match) -> Token,
{
    fn build(&self, kind: &str, matched: Match) -> Token {
        self(kind, matched)
    }
}
