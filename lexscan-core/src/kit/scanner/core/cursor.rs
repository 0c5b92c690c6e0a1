//! Cursor over the input
//!
//! Splits the input into a consumed prefix and a remaining suffix.
//! `consumed + remaining == input` holds after every operation.

use super::position::SourcePosition;
use crate::kit::scanner::error::{ScanError, ScanResult};

#[derive(Debug, Clone)]
pub struct Cursor {
    input: String,
    consumed: String,
    /// Byte offset of the first remaining character
    position: usize,
    loc: SourcePosition,
}

impl Cursor {
    pub fn new(input: impl Into<String>) -> Self {
        let input = input.into();
        Self {
            consumed: String::with_capacity(input.len()),
            input,
            position: 0,
            loc: SourcePosition::start(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn remaining(&self) -> &str {
        &self.input[self.position..]
    }

    pub fn consumed(&self) -> &str {
        &self.consumed
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn location(&self) -> SourcePosition {
        self.loc
    }

    /// Nothing consumed yet
    pub fn bos(&self) -> bool {
        self.consumed.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.position == self.input.len()
    }

    /// Text from absolute offset `at` to the end of input
    pub fn rest_from(&self, at: usize) -> &str {
        &self.input[at..]
    }

    fn check_len(&self, len: usize) -> ScanResult<()> {
        let remaining = self.remaining();
        if len > remaining.len() {
            return Err(ScanError::invalid_argument(format!(
                "cannot consume {} bytes, {} remaining",
                len,
                remaining.len()
            )));
        }
        if !remaining.is_char_boundary(len) {
            return Err(ScanError::invalid_argument(format!(
                "consuming {} bytes would split a character at offset {}",
                len,
                self.position + len
            )));
        }
        Ok(())
    }

    /// Move `len` bytes from the remaining input to the consumed text
    pub fn consume(&mut self, len: usize) -> ScanResult<String> {
        self.check_len(len)?;
        let text = self.remaining()[..len].to_string();
        self.consumed.push_str(&text);
        self.loc.advance_str(&text);
        self.position += len;
        Ok(text)
    }

    /// Like [`Self::consume`], trusting `value` to be the consumed text
    pub fn consume_with(&mut self, len: usize, value: &str) -> ScanResult<String> {
        self.check_len(len)?;
        debug_assert_eq!(&self.remaining()[..len], value);
        self.consumed.push_str(value);
        self.loc.advance_str(value);
        self.position += len;
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::scanner::ErrorKind;

    #[test]
    fn test_consume_moves_text() {
        let mut cursor = Cursor::new("abc\ndef");
        assert!(cursor.bos());

        assert_eq!(cursor.consume(4).unwrap(), "abc\n");
        assert_eq!(cursor.consumed(), "abc\n");
        assert_eq!(cursor.remaining(), "def");
        assert_eq!(cursor.position(), 4);
        assert_eq!(cursor.location(), SourcePosition::new(2, 1, 4));
        assert!(!cursor.bos());
    }

    #[test]
    fn test_consume_zero_is_noop() {
        let mut cursor = Cursor::new("abc");
        assert_eq!(cursor.consume(0).unwrap(), "");
        assert!(cursor.bos());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_consume_past_end() {
        let mut cursor = Cursor::new("ab");
        let err = cursor.consume(3).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidArgument(_)));
        assert_eq!(cursor.remaining(), "ab");
    }

    #[test]
    fn test_consume_inside_char() {
        let mut cursor = Cursor::new("é!");
        let err = cursor.consume(1).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidArgument(_)));
        assert_eq!(cursor.consume(2).unwrap(), "é");
        assert_eq!(cursor.location().column, 2);
    }

    #[test]
    fn test_consume_with_trusted_value() {
        let mut cursor = Cursor::new("hello world");
        assert_eq!(cursor.consume_with(5, "hello").unwrap(), "hello");
        assert_eq!(cursor.remaining(), " world");
        assert!(!cursor.is_exhausted());
        cursor.consume(6).unwrap();
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.consumed(), cursor.input());
    }
}
