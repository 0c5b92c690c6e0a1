//! lexscan Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It is the shared vocabulary between the scanner core and the CLI:
//! scanner tuning, serialized rule definitions and log phases.

use serde::{Deserialize, Serialize};

/// Configuration for scanner behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Number of characters of unscanned input quoted in error snippets
    pub snippet_len: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self { snippet_len: 16 }
    }
}

/// One pattern source or an ordered list of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternSource {
    One(String),
    Many(Vec<String>),
}

impl PatternSource {
    /// Normalize into an ordered list of pattern sources
    pub fn into_vec(self) -> Vec<String> {
        match self {
            PatternSource::One(source) => vec![source],
            PatternSource::Many(sources) => sources,
        }
    }
}

/// A serialized rule definition
///
/// Accepts both `{"name": .., "pattern": ..}` and the shorthand
/// `{"type": .., "regex": ..}` spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDef {
    #[serde(alias = "type")]
    pub name: String,
    #[serde(alias = "regex", alias = "patterns")]
    pub pattern: PatternSource,
}

/// Rules as they appear in a manifest: a list of definitions or an ordered map
///
/// Map order is significant and is kept as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RulesInput {
    List(Vec<RuleDef>),
    Map(serde_ordered::OrderedMap),
}

impl RulesInput {
    /// Flatten into `(name, sources)` pairs in declaration order
    pub fn into_pairs(self) -> Vec<(String, Vec<String>)> {
        match self {
            RulesInput::List(defs) => defs
                .into_iter()
                .map(|def| (def.name, def.pattern.into_vec()))
                .collect(),
            RulesInput::Map(map) => map
                .0
                .into_iter()
                .map(|(name, source)| (name, source.into_vec()))
                .collect(),
        }
    }
}

mod serde_ordered {
    use super::PatternSource;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;

    /// Map that keeps entries in the order the deserializer produced them
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct OrderedMap(pub Vec<(String, PatternSource)>);

    impl<'de> Deserialize<'de> for OrderedMap {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct OrderedVisitor;

            impl<'de> Visitor<'de> for OrderedVisitor {
                type Value = OrderedMap;

                fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    f.write_str("a map from rule name to pattern(s)")
                }

                fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<OrderedMap, A::Error> {
                    let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                    while let Some((name, source)) = access.next_entry::<String, PatternSource>()? {
                        // Later duplicates overwrite in place, like a rule re-registration
                        match entries.iter_mut().find(|(existing, _)| *existing == name) {
                            Some(entry) => entry.1 = source,
                            None => entries.push((name, source)),
                        }
                    }
                    Ok(OrderedMap(entries))
                }
            }

            deserializer.deserialize_map(OrderedVisitor)
        }
    }

    impl Serialize for OrderedMap {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.0.len()))?;
            for (name, source) in &self.0 {
                map.serialize_entry(name, source)?;
            }
            map.end()
        }
    }
}

pub use serde_ordered::OrderedMap;

/// Log verbosity as written in a manifest
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Scanner phase, used for per-phase log filtering
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Rules,
    Scanner,
    Queue,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Rules, Phase::Scanner, Phase::Queue];

    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Rules => "rules",
            Phase::Scanner => "scanner",
            Phase::Queue => "queue",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> &'static str {
        match self {
            Phase::Rules => "lexscan::rules",
            Phase::Scanner => "lexscan::scanner",
            Phase::Queue => "lexscan::queue",
        }
    }
}
