//! Lookahead queue
//!
//! Holds tokens that were matched but not consumed. Entries are contiguous:
//! the first starts at the cursor position, each next one where the previous
//! ended, and the scan head sits where the last one ends.

use std::collections::VecDeque;
use std::ops::Range;

use tracing::debug;

use super::position::SourcePosition;
use crate::kit::scanner::token::Token;

#[derive(Debug, Clone)]
struct Pending {
    token: Token,
    range: Range<usize>,
    end: SourcePosition,
}

#[derive(Debug, Clone, Default)]
pub struct LookaheadQueue {
    entries: VecDeque<Pending>,
    head: usize,
    head_loc: SourcePosition,
}

impl LookaheadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absolute offset where the next match is attempted
    pub fn head(&self) -> usize {
        self.head
    }

    pub fn head_location(&self) -> SourcePosition {
        self.head_loc
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Token `i` (0-based) from the front
    pub fn get(&self, i: usize) -> Option<&Token> {
        self.entries.get(i).map(|p| &p.token)
    }

    /// Append a token covering `range`, moving the head past it
    pub fn push(&mut self, token: Token, range: Range<usize>, end: SourcePosition) {
        self.head = range.end;
        self.head_loc = end;
        self.entries.push_back(Pending { token, range, end });
    }

    /// Realign with the cursor after it moved to `position`
    ///
    /// Drops entries whose text is already consumed. If the rest no longer
    /// starts exactly at `position`, everything is dropped and the head is
    /// reset to the cursor.
    pub fn sync(&mut self, position: usize, loc: SourcePosition) {
        let before = self.entries.len();
        while self
            .entries
            .front()
            .is_some_and(|p| p.range.start < position)
        {
            self.entries.pop_front();
        }
        if self
            .entries
            .front()
            .is_some_and(|p| p.range.start != position)
        {
            self.entries.clear();
        }
        if self.entries.is_empty() {
            self.head = position;
            self.head_loc = loc;
        }
        let dropped = before - self.entries.len();
        if dropped > 0 {
            debug!(
                target: "lexscan::queue",
                dropped,
                position,
                "Discarded queued tokens overlapping consumed text"
            );
        }
    }

    /// Drop entries past the first `len`, pulling the head back
    ///
    /// With no entries left the head returns to the cursor at `position`.
    pub fn truncate(&mut self, len: usize, position: usize, loc: SourcePosition) {
        self.entries.truncate(len);
        match self.entries.back() {
            Some(last) => {
                self.head = last.range.end;
                self.head_loc = last.end;
            }
            None => {
                self.head = position;
                self.head_loc = loc;
            }
        }
    }

    /// Remove the front entry with the byte range it covers; the head stays
    pub(crate) fn pop_entry(&mut self) -> Option<(Token, Range<usize>, SourcePosition)> {
        self.entries
            .pop_front()
            .map(|p| (p.token, p.range, p.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::scanner::{Match, SourceSpan};
    use std::collections::BTreeMap;

    fn token(text: &str, start: usize) -> (Token, Range<usize>, SourcePosition) {
        let from = SourcePosition::new(1, start + 1, start);
        let end = from.after(text);
        let matched = Match {
            text: text.to_string(),
            index: start,
            captures: Vec::new(),
            groups: BTreeMap::new(),
            range: start..start + text.len(),
            loc: SourceSpan::range(from, end),
        };
        let range = matched.range.clone();
        (Token::new("t", matched), range, end)
    }

    fn push(queue: &mut LookaheadQueue, text: &str, start: usize) {
        let (t, range, end) = token(text, start);
        queue.push(t, range, end);
    }

    #[test]
    fn test_push_moves_head() {
        let mut queue = LookaheadQueue::new();
        push(&mut queue, "ab", 0);
        push(&mut queue, "c", 2);
        assert_eq!(queue.head(), 3);
        assert_eq!(queue.head_location().column, 4);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.get(1).map(|t| t.value.as_str()), Some("c"));
    }

    #[test]
    fn test_pop_is_fifo() {
        let mut queue = LookaheadQueue::new();
        push(&mut queue, "ab", 0);
        push(&mut queue, "c", 2);
        let (first, range, _) = queue.pop_entry().unwrap();
        assert_eq!((first.value.as_str(), range), ("ab", 0..2));
        assert_eq!(queue.pop_entry().unwrap().0.value, "c");
        assert!(queue.pop_entry().is_none());
        assert_eq!(queue.head(), 3);
    }

    #[test]
    fn test_truncate_pulls_head_back() {
        let mut queue = LookaheadQueue::new();
        push(&mut queue, "ab", 0);
        push(&mut queue, "cd", 2);
        queue.truncate(1, 0, SourcePosition::start());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.head(), 2);
        assert_eq!(queue.head_location().column, 3);

        queue.truncate(0, 0, SourcePosition::start());
        assert!(queue.is_empty());
        assert_eq!(queue.head(), 0);
        assert_eq!(queue.head_location(), SourcePosition::start());
    }

    #[test]
    fn test_sync_after_front_consumed() {
        let mut queue = LookaheadQueue::new();
        push(&mut queue, "ab", 0);
        push(&mut queue, "c", 2);
        queue.pop_entry();
        queue.sync(2, SourcePosition::new(1, 3, 2));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.head(), 3);
    }

    #[test]
    fn test_sync_drops_overlapping() {
        let mut queue = LookaheadQueue::new();
        push(&mut queue, "ab", 0);
        push(&mut queue, "cd", 2);
        queue.sync(3, SourcePosition::new(1, 4, 3));
        assert!(queue.is_empty());
        assert_eq!(queue.head(), 3);
        assert_eq!(queue.head_location().column, 4);
    }

    #[test]
    fn test_sync_keeps_aligned_tail() {
        let mut queue = LookaheadQueue::new();
        push(&mut queue, "ab", 0);
        push(&mut queue, "cd", 2);
        queue.sync(2, SourcePosition::new(1, 3, 2));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.get(0).unwrap().value, "cd");
        assert_eq!(queue.head(), 4);
    }
}
