//! Rule table
//!
//! Rules are kept in registration order. Registering an existing name
//! replaces its patterns but keeps its place in the order.

use std::collections::HashMap;

use tracing::debug;

use super::error::ScanResult;
use super::pattern::{IntoPatterns, Pattern};
use lexscan_config::RulesInput;

/// Named, ordered set of patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub patterns: Vec<Pattern>,
}

/// Shorthand rule form: `{ kind, patterns }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub kind: String,
    pub patterns: Vec<Pattern>,
}

impl RuleSpec {
    pub fn new(kind: impl Into<String>, patterns: impl IntoPatterns) -> ScanResult<Self> {
        Ok(Self {
            kind: kind.into(),
            patterns: patterns.into_patterns()?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
    index: HashMap<String, usize>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `patterns` under `name`, replacing any previous entry
    pub fn insert(&mut self, name: impl Into<String>, patterns: Vec<Pattern>) {
        let name = name.into();
        debug!(
            target: "lexscan::rules",
            rule = %name,
            patterns = patterns.len(),
            "Registering rule"
        );
        match self.index.get(&name) {
            Some(&slot) => self.rules[slot].patterns = patterns,
            None => {
                self.index.insert(name.clone(), self.rules.len());
                self.rules.push(Rule { name, patterns });
            }
        }
    }

    pub fn add(&mut self, name: impl Into<String>, patterns: impl IntoPatterns) -> ScanResult<()> {
        let name = name.into();
        let patterns = patterns.into_patterns().map_err(|e| e.in_rule(&name))?;
        self.insert(name, patterns);
        Ok(())
    }

    pub fn add_spec(&mut self, spec: RuleSpec) {
        self.insert(spec.kind, spec.patterns);
    }

    /// Register serialized rules in declaration order
    pub fn add_input(&mut self, input: RulesInput) -> ScanResult<()> {
        for (name, sources) in input.into_pairs() {
            let patterns = sources.into_patterns().map_err(|e| e.in_rule(&name))?;
            self.insert(name, patterns);
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.index.get(name).map(|&slot| &self.rules[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
