//! Scanner entry point
//!
//! Pulls tokens out of the input one at a time:
//!
//! 1. serve from the lookahead queue if it is non-empty
//! 2. otherwise try every rule, in registration order, at the scan head
//! 3. consume the token's text from the remaining input
//!
//! ```
//! use lexscan_core::Scanner;
//!
//! let mut scanner = Scanner::with_rules("a = 1", [
//!     ("ident", r"^[a-z]+"),
//!     ("number", r"^\d+"),
//!     ("space", r"^\s+"),
//!     ("equal", r"^="),
//! ])?;
//!
//! assert_eq!(scanner.lookahead(3)?.map(|t| t.kind.as_str()), Some("equal"));
//! assert_eq!(scanner.scan()?.map(|t| t.value), Some("a".to_string()));
//! # Ok::<(), lexscan_core::ScanError>(())
//! ```

use std::collections::HashSet;
use std::ops::Range;

use tracing::{debug, trace, warn};

use super::core::{Cursor, LookaheadQueue, SourcePosition, SourceSpan};
use super::error::{ScanError, ScanResult};
use super::pattern::{IntoPatterns, Pattern, PatternId};
use super::rules::{Rule, RuleSpec, RuleTable};
use super::token::{DefaultTokenFactory, Match, Token, TokenFactory};
use lexscan_config::{RulesInput, ScannerConfig};

/// Token together with the text it claims
type Claimed = (Token, Range<usize>, SourcePosition);

/// Incremental rule-driven scanner
pub struct Scanner<F = DefaultTokenFactory> {
    cursor: Cursor,
    rules: RuleTable,
    queue: LookaheadQueue,
    /// Patterns already checked for anchoring
    validated: HashSet<PatternId>,
    factory: F,
    config: ScannerConfig,
}

impl Scanner {
    /// Create a scanner with no rules and the default token factory
    pub fn new(input: impl Into<String>) -> Self {
        ScannerBuilder::new(input).build()
    }

    /// Create a scanner and register `(name, patterns)` pairs in order
    pub fn with_rules<I, N, P>(input: impl Into<String>, rules: I) -> ScanResult<Self>
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: IntoPatterns,
    {
        let mut scanner = Self::new(input);
        scanner.add_rules(rules)?;
        Ok(scanner)
    }

    /// Create a scanner over raw bytes, which must be UTF-8
    pub fn from_bytes(input: &[u8]) -> ScanResult<Self> {
        let input = std::str::from_utf8(input).map_err(|e| {
            warn!(target: "lexscan::scanner", error = %e, "Rejecting non UTF-8 input");
            ScanError::invalid_input(e.to_string())
        })?;
        Ok(Self::new(input))
    }

    pub fn builder(input: impl Into<String>) -> ScannerBuilder {
        ScannerBuilder::new(input)
    }
}

impl<F> Scanner<F> {
    pub fn input(&self) -> &str {
        self.cursor.input()
    }

    /// Unconsumed input, including text held by queued tokens
    pub fn remaining(&self) -> &str {
        self.cursor.remaining()
    }

    pub fn consumed(&self) -> &str {
        self.cursor.consumed()
    }

    /// Absolute byte offset of the remaining input
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Line and column of the remaining input
    pub fn location(&self) -> SourcePosition {
        self.cursor.location()
    }

    /// Number of tokens waiting in the lookahead queue
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Nothing consumed yet
    pub fn bos(&self) -> bool {
        self.cursor.bos()
    }

    /// No remaining input and no queued tokens
    pub fn eos(&self) -> bool {
        self.cursor.is_exhausted() && self.queue.is_empty()
    }

    pub fn add_rule(
        &mut self,
        name: impl Into<String>,
        patterns: impl IntoPatterns,
    ) -> ScanResult<&mut Self> {
        self.rules.add(name, patterns)?;
        Ok(self)
    }

    pub fn add_rule_spec(&mut self, spec: RuleSpec) -> &mut Self {
        self.rules.add_spec(spec);
        self
    }

    /// Register `(name, patterns)` pairs in iteration order
    pub fn add_rules<I, N, P>(&mut self, rules: I) -> ScanResult<&mut Self>
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: IntoPatterns,
    {
        for (name, patterns) in rules {
            self.rules.add(name, patterns)?;
        }
        Ok(self)
    }

    pub fn add_rule_specs(&mut self, specs: impl IntoIterator<Item = RuleSpec>) -> &mut Self {
        for spec in specs {
            self.rules.add_spec(spec);
        }
        self
    }

    pub fn add_rules_input(&mut self, input: RulesInput) -> ScanResult<&mut Self> {
        self.rules.add_input(input)?;
        Ok(self)
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.contains(name)
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Append a token to the lookahead queue; `None` is ignored
    ///
    /// The token claims the text in its `range`, which must start at the
    /// current scan head and end on a character boundary inside the input.
    pub fn enqueue(&mut self, token: impl Into<Option<Token>>) -> ScanResult<()> {
        let Some(token) = token.into() else {
            return Ok(());
        };
        let range = token.range.clone();
        self.check_claim(&range)?;
        let end = self
            .queue
            .head_location()
            .after(&self.cursor.input()[range.clone()]);
        trace!(target: "lexscan::queue", kind = %token.kind, ?range, "Enqueue token");
        self.queue.push(token, range, end);
        Ok(())
    }

    fn check_claim(&self, range: &Range<usize>) -> ScanResult<()> {
        let head = self.queue.head();
        let input = self.cursor.input();
        if range.start != head {
            return Err(ScanError::invalid_argument(format!(
                "token range {:?} does not start at the scan head {}",
                range, head
            )));
        }
        if range.end < range.start {
            return Err(ScanError::invalid_argument(format!(
                "token range {:?} is inverted",
                range
            )));
        }
        if range.end > input.len() {
            return Err(ScanError::invalid_argument(format!(
                "token range {:?} extends past the end of input ({} bytes)",
                range,
                input.len()
            )));
        }
        if !input.is_char_boundary(range.end) {
            return Err(ScanError::invalid_argument(format!(
                "token range {:?} splits a character",
                range
            )));
        }
        Ok(())
    }

    /// Take the front token of the queue, consuming its text
    pub fn dequeue(&mut self) -> ScanResult<Option<Token>> {
        let Some((token, range, _)) = self.queue.pop_entry() else {
            return Ok(None);
        };
        trace!(target: "lexscan::queue", kind = %token.kind, ?range, "Dequeue token");
        self.consume(range.len())?;
        Ok(Some(token))
    }

    /// Move `len` bytes of input to the consumed text
    ///
    /// Queued tokens covering that text are discarded.
    pub fn consume(&mut self, len: usize) -> ScanResult<String> {
        let text = self.cursor.consume(len)?;
        self.queue.sync(self.cursor.position(), self.cursor.location());
        Ok(text)
    }

    /// Like [`Self::consume`], appending `value` verbatim
    ///
    /// `value` must equal the next `len` bytes of the remaining input.
    pub fn consume_with(&mut self, len: usize, value: &str) -> ScanResult<String> {
        let text = self.cursor.consume_with(len, value)?;
        self.queue.sync(self.cursor.position(), self.cursor.location());
        Ok(text)
    }

    fn snippet(&self, at: usize) -> String {
        self.cursor
            .rest_from(at)
            .chars()
            .take(self.config.snippet_len)
            .collect()
    }
}

impl<F: TokenFactory> Scanner<F> {
    /// Match `pattern` at the scan head without moving anything
    pub fn match_pattern(&mut self, pattern: &Pattern) -> ScanResult<Option<Match>> {
        let head = self.queue.head();
        let loc = self.queue.head_location();
        match_at(&mut self.validated, self.cursor.rest_from(head), head, loc, pattern)
            .map_err(|e| e.at(loc, self.snippet(head)))
    }

    /// Produce the next token at the scan head without queueing or consuming it
    pub fn advance(&mut self) -> ScanResult<Option<Token>> {
        Ok(self.advance_claim()?.map(|(token, _, _)| token))
    }

    fn advance_claim(&mut self) -> ScanResult<Option<Claimed>> {
        let head = self.queue.head();
        let loc = self.queue.head_location();
        let rest = self.cursor.rest_from(head);
        if rest.is_empty() {
            return Ok(None);
        }

        for rule in &self.rules {
            for pattern in &rule.patterns {
                let found = match match_at(&mut self.validated, rest, head, loc, pattern) {
                    Ok(found) => found,
                    Err(e) => {
                        warn!(
                            target: "lexscan::scanner",
                            rule = %rule.name,
                            line = loc.line,
                            column = loc.column,
                            error = %e.kind,
                            "Rule failed"
                        );
                        return Err(e.in_rule(&rule.name).at(loc, self.snippet(head)));
                    }
                };
                if let Some(matched) = found {
                    let range = matched.range.clone();
                    let end = matched.loc.end;
                    let token = self.factory.build(&rule.name, matched);
                    trace!(
                        target: "lexscan::scanner",
                        kind = %rule.name,
                        value = ?token.value,
                        line = loc.line,
                        column = loc.column,
                        "Produced token"
                    );
                    return Ok(Some((token, range, end)));
                }
            }
        }

        debug!(
            target: "lexscan::scanner",
            line = loc.line,
            column = loc.column,
            "No rule matches remaining input"
        );
        Ok(None)
    }

    /// Make sure `n` tokens are queued if possible and return the `n`-th (1-based)
    pub fn lookahead(&mut self, n: usize) -> ScanResult<Option<&Token>> {
        while self.queue.len() < n {
            match self.advance_claim()? {
                Some((token, range, end)) => self.queue.push(token, range, end),
                None => break,
            }
        }
        Ok(n.checked_sub(1).and_then(|i| self.queue.get(i)))
    }

    /// Next token without consuming it
    pub fn peek(&mut self) -> ScanResult<Option<&Token>> {
        self.lookahead(1)
    }

    fn next_claim(&mut self) -> ScanResult<Option<Claimed>> {
        match self.queue.pop_entry() {
            Some(claimed) => Ok(Some(claimed)),
            None => self.advance_claim(),
        }
    }

    /// Produce the next token and consume its text
    pub fn scan(&mut self) -> ScanResult<Option<Token>> {
        let Some((token, range, _)) = self.next_claim()? else {
            return Ok(None);
        };
        self.consume(range.len())?;
        Ok(Some(token))
    }

    /// Scan while `predicate` accepts the next token
    ///
    /// The predicate sees `None` at the end of input. A rejected token is
    /// not left in the queue unless it was queued before the call.
    pub fn scan_while<P>(&mut self, mut predicate: P) -> ScanResult<Vec<Token>>
    where
        P: FnMut(Option<&Token>) -> bool,
    {
        let mut tokens = Vec::new();
        loop {
            let queued = self.queue.len();
            let next = self.peek()?;
            if !predicate(next) {
                self.queue
                    .truncate(queued, self.cursor.position(), self.cursor.location());
                break;
            }
            match self.scan()? {
                Some(token) => tokens.push(token),
                None => break,
            }
        }
        Ok(tokens)
    }

    /// Scan until no more tokens can be produced
    pub fn scan_all(&mut self) -> ScanResult<Vec<Token>> {
        self.scan_while(|token| token.is_some())
    }

    /// Scan and return up to `n` tokens
    pub fn skip(&mut self, n: usize) -> ScanResult<Vec<Token>> {
        let mut tokens = Vec::with_capacity(n);
        while tokens.len() < n {
            match self.scan()? {
                Some(token) => tokens.push(token),
                None => break,
            }
        }
        Ok(tokens)
    }

    /// Scan past tokens of the given kinds
    pub fn skip_kinds(&mut self, kinds: &[&str]) -> ScanResult<Vec<Token>> {
        self.scan_while(|token| token.is_some_and(|t| kinds.contains(&t.kind.as_str())))
    }

    /// Iterate over scanned tokens; iteration ends after the first error
    pub fn tokens(&mut self) -> Tokens<'_, F> {
        Tokens {
            scanner: self,
            halted: false,
        }
    }
}

/// Iterator over scanned tokens, see [`Scanner::tokens`]
pub struct Tokens<'a, F> {
    scanner: &'a mut Scanner<F>,
    halted: bool,
}

impl<F: TokenFactory> Iterator for Tokens<'_, F> {
    type Item = ScanResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        match self.scanner.scan() {
            Ok(token) => token.map(Ok),
            Err(e) => {
                self.halted = true;
                Some(Err(e))
            }
        }
    }
}

impl<F> std::fmt::Debug for Scanner<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("position", &self.cursor.position())
            .field("location", &self.cursor.location())
            .field("rules", &self.rules.len())
            .field("queued", &self.queue.len())
            .finish()
    }
}

/// Match `pattern` against the start of `text`, which begins at absolute `at`
fn match_at(
    validated: &mut HashSet<PatternId>,
    text: &str,
    at: usize,
    loc: SourcePosition,
    pattern: &Pattern,
) -> ScanResult<Option<Match>> {
    if !validated.contains(&pattern.id()) {
        pattern.check_anchored()?;
        validated.insert(pattern.id());
    }

    if text.is_empty() {
        return Ok(None);
    }

    let regex = pattern.regex();
    let Some(caps) = regex.captures(text) else {
        return Ok(None);
    };
    let Some(whole) = caps.get(0).filter(|m| m.start() == 0) else {
        return Ok(None);
    };
    if whole.is_empty() {
        return Err(ScanError::zero_width(pattern.as_str()));
    }

    let captures = (1..caps.len())
        .map(|i| caps.get(i).map(|m| m.as_str().to_string()))
        .collect();
    let groups = regex
        .capture_names()
        .flatten()
        .filter_map(|name| caps.name(name).map(|m| (name.to_string(), m.as_str().to_string())))
        .collect();

    let text = whole.as_str().to_string();
    let end = loc.after(&text);
    Ok(Some(Match {
        index: at,
        range: at..at + text.len(),
        loc: SourceSpan::range(loc, end),
        text,
        captures,
        groups,
    }))
}

/// Builder for scanners with custom configuration or token factory
pub struct ScannerBuilder<F = DefaultTokenFactory> {
    input: String,
    config: ScannerConfig,
    rules: RuleTable,
    factory: F,
}

impl ScannerBuilder {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            config: ScannerConfig::default(),
            rules: RuleTable::new(),
            factory: DefaultTokenFactory,
        }
    }
}

impl<F> ScannerBuilder<F> {
    pub fn config(mut self, config: ScannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the token factory
    pub fn factory<G: TokenFactory>(self, factory: G) -> ScannerBuilder<G> {
        ScannerBuilder {
            input: self.input,
            config: self.config,
            rules: self.rules,
            factory,
        }
    }

    pub fn rule(mut self, name: impl Into<String>, patterns: impl IntoPatterns) -> ScanResult<Self> {
        self.rules.add(name, patterns)?;
        Ok(self)
    }

    pub fn rules_input(mut self, input: RulesInput) -> ScanResult<Self> {
        self.rules.add_input(input)?;
        Ok(self)
    }

    pub fn build(self) -> Scanner<F> {
        trace!(
            target: "lexscan::scanner",
            len = self.input.len(),
            rules = self.rules.len(),
            "Creating new Scanner"
        );
        Scanner {
            cursor: Cursor::new(self.input),
            rules: self.rules,
            queue: LookaheadQueue::new(),
            validated: HashSet::new(),
            factory: self.factory,
            config: self.config,
        }
    }
}
