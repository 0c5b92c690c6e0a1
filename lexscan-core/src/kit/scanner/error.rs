//! Scanner error types
//!
//! Structured scan errors: what went wrong, which rule was being tried and
//! where in the input it happened.

use super::core::SourcePosition;

/// Scan result type
pub type ScanResult<T> = std::result::Result<T, ScanError>;

/// Error kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// Input is not valid UTF-8 text
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Pattern does not compile or is not anchored to the start of input
    #[error("invalid pattern /{pattern}/: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Pattern matched without consuming anything
    #[error("pattern /{pattern}/ matched an empty string")]
    UnsafeZeroWidthMatch { pattern: String },

    /// Argument out of range for the operation
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Scan error with optional context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    pub kind: ErrorKind,
    /// Rule being evaluated when the error was raised
    pub rule: Option<String>,
    /// Leading slice of the unscanned input
    pub snippet: Option<String>,
    /// Where the unscanned input started
    pub position: Option<SourcePosition>,
}

impl ScanError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            rule: None,
            snippet: None,
            position: None,
        }
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput(reason.into()))
    }

    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        })
    }

    pub fn zero_width(pattern: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsafeZeroWidthMatch {
            pattern: pattern.into(),
        })
    }

    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument(reason.into()))
    }

    /// Tag the error with the rule being evaluated
    pub fn in_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Attach the location and a snippet of the unscanned input
    pub fn at(mut self, position: SourcePosition, snippet: impl Into<String>) -> Self {
        self.position = Some(position);
        self.snippet = Some(snippet.into());
        self
    }

    /// Line number (1-based), if known
    pub fn line(&self) -> Option<usize> {
        self.position.map(|p| p.line)
    }

    /// Column number (1-based), if known
    pub fn column(&self) -> Option<usize> {
        self.position.map(|p| p.column)
    }
}

impl From<ErrorKind> for ScanError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(position) = &self.position {
            write!(f, "[{}] ", position)?;
        }
        if let Some(rule) = &self.rule {
            write!(f, "rule '{}': ", rule)?;
        }
        write!(f, "{}", self.kind)?;
        if let Some(snippet) = &self.snippet {
            write!(f, " near {:?}", snippet)?;
        }
        Ok(())
    }
}

impl std::error::Error for ScanError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_plain_display() {
        let err = ScanError::invalid_argument("cannot consume 5 bytes, 2 remaining");
        assert_eq!(
            err.to_string(),
            "invalid argument: cannot consume 5 bytes, 2 remaining"
        );
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_scan_error_with_context() {
        let pos = SourcePosition::new(3, 7, 40);
        let err = ScanError::zero_width("^a*").in_rule("stars").at(pos, "bcd");

        let display = err.to_string();
        assert!(display.starts_with("[3:7] rule 'stars': "));
        assert!(display.contains("matched an empty string"));
        assert!(display.ends_with(r#"near "bcd""#));
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.column(), Some(7));
    }

    #[test]
    fn test_invalid_pattern_message() {
        let err = ScanError::invalid_pattern("foo", "not anchored to the start of input");
        assert!(matches!(err.kind, ErrorKind::InvalidPattern { ref pattern, .. } if pattern == "foo"));
        assert!(err.to_string().contains("/foo/"));
    }

    #[test]
    fn test_scan_error_clone() {
        let err = ScanError::invalid_input("invalid utf-8 sequence of 1 bytes from index 0")
            .in_rule("x");
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }
}
