//! Source position tracking
//!
//! Two coordinate systems are kept side by side:
//! - line/column: human readable error display (1-based, columns in chars)
//! - offset: absolute byte offset into the input (0-based), used for slicing

use serde::Serialize;

/// Source position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SourcePosition {
    /// Line number, 1-based
    pub line: usize,
    /// Column number, 1-based, counted in Unicode scalar values
    pub column: usize,
    /// Byte offset, 0-based
    pub offset: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Start of input
    pub fn start() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Advance over one character
    pub fn advance(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.offset += c.len_utf8();
    }

    /// Advance over a run of text
    pub fn advance_str(&mut self, text: &str) {
        for c in text.chars() {
            self.advance(c);
        }
    }

    /// Position reached after `text`, leaving `self` untouched
    pub fn after(&self, text: &str) -> Self {
        let mut end = *self;
        end.advance_str(text);
        end
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::start()
    }
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source span, `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SourceSpan {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl SourceSpan {
    /// Empty span at a single position
    pub fn at(pos: SourcePosition) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn range(start: SourcePosition, end: SourcePosition) -> Self {
        Self { start, end }
    }

    /// Byte length covered by the span
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
