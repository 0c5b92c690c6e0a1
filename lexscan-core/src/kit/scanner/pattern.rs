//! Anchored patterns
//!
//! A [`Pattern`] is a compiled regex plus an identity. Clones share the
//! identity, so the scanner can remember which patterns it already checked
//! for anchoring without touching the pattern itself.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use regex::Regex;

use super::error::{ScanError, ScanResult};

static NEXT_PATTERN_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique pattern identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternId(u64);

/// Compiled pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    id: PatternId,
    regex: Arc<Regex>,
}

impl Pattern {
    /// Compile a pattern from source
    pub fn new(source: &str) -> ScanResult<Self> {
        let regex = Regex::new(source)
            .map_err(|e| ScanError::invalid_pattern(source, e.to_string()))?;
        Ok(Self::from_regex(regex))
    }

    pub fn from_regex(regex: Regex) -> Self {
        Self {
            id: PatternId(NEXT_PATTERN_ID.fetch_add(1, Ordering::Relaxed)),
            regex: Arc::new(regex),
        }
    }

    pub fn id(&self) -> PatternId {
        self.id
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Check that the pattern can only match at the start of input
    ///
    /// Leading inline flag groups such as `(?i)` are skipped; what follows
    /// must be `\A`, or `^` with multi-line mode off.
    pub fn check_anchored(&self) -> ScanResult<()> {
        let mut rest = self.as_str();
        let mut multi_line = false;

        while let Some(group) = rest.strip_prefix("(?") {
            let Some(end) = group.find(')') else { break };
            let flags = &group[..end];
            if !flags.chars().all(|c| "imsxuUR-".contains(c)) {
                break;
            }
            let enabled = flags.split('-').next().unwrap_or("");
            let disabled = flags.split('-').nth(1).unwrap_or("");
            if enabled.contains('m') {
                multi_line = true;
            }
            if disabled.contains('m') {
                multi_line = false;
            }
            rest = &group[end + 1..];
        }

        if rest.starts_with(r"\A") {
            return Ok(());
        }
        if rest.starts_with('^') {
            if multi_line {
                return Err(ScanError::invalid_pattern(
                    self.as_str(),
                    "'^' in multi-line mode also matches after newlines, use \\A",
                ));
            }
            return Ok(());
        }
        Err(ScanError::invalid_pattern(
            self.as_str(),
            "pattern must be anchored to the start of input with '^' or '\\A'",
        ))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Pattern {}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self::from_regex(regex)
    }
}

/// Anything that can be registered as a rule's pattern list
///
/// A single pattern becomes a one-element list.
pub trait IntoPatterns {
    fn into_patterns(self) -> ScanResult<Vec<Pattern>>;
}

macro_rules! impl_into_patterns {
    ($($single:ty => $convert:expr),* $(,)?) => {
        $(
            impl IntoPatterns for $single {
                fn into_patterns(self) -> ScanResult<Vec<Pattern>> {
                    let convert: fn($single) -> ScanResult<Pattern> = $convert;
                    Ok(vec![convert(self)?])
                }
            }

            impl IntoPatterns for Vec<$single> {
                fn into_patterns(self) -> ScanResult<Vec<Pattern>> {
                    let convert: fn($single) -> ScanResult<Pattern> = $convert;
                    self.into_iter().map(convert).collect()
                }
            }

            impl<const N: usize> IntoPatterns for [$single; N] {
                fn into_patterns(self) -> ScanResult<Vec<Pattern>> {
                    let convert: fn($single) -> ScanResult<Pattern> = $convert;
                    self.into_iter().map(convert).collect()
                }
            }
        )*
    };
}

impl_into_patterns! {
    Pattern => Ok,
    Regex => |regex| Ok(Pattern::from_regex(regex)),
    String => |source| Pattern::new(&source),
    &str => |source| Pattern::new(source),
}

impl IntoPatterns for &[&str] {
    fn into_patterns(self) -> ScanResult<Vec<Pattern>> {
        self.iter().map(|source| Pattern::new(source)).collect()
    }
}

impl IntoPatterns for &Pattern {
    fn into_patterns(self) -> ScanResult<Vec<Pattern>> {
        Ok(vec![self.clone()])
    }
}
