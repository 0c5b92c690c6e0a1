//! CLI configuration
//!
//! The manifest format and the per-phase log configuration derived from it

use lexscan_config::{LogLevel, Phase, RulesInput, ScannerConfig};
use serde::Deserialize;
use tracing::Level;

/// Manifest file structure
#[derive(Debug, Deserialize)]
pub struct Manifest {
    /// Rules as a list of definitions or an ordered map
    pub rules: RulesInput,
    /// Scanner tuning
    #[serde(default)]
    pub scanner: ScannerConfig,
    /// Log levels
    #[serde(default)]
    pub log: LogSection,
}

/// `log` section of the manifest
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Global level, also used for phases without their own level
    pub level: Option<LogLevel>,
    pub rules: Option<LogLevel>,
    pub scanner: Option<LogLevel>,
    pub queue: Option<LogLevel>,
}

/// CLI log configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: Level,
    pub rules: Option<Level>,
    pub scanner: Option<Level>,
    pub queue: Option<Level>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::WARN,
            rules: None,
            scanner: None,
            queue: None,
        }
    }
}

impl LogConfig {
    pub fn from_section(section: &LogSection) -> Self {
        let defaults = Self::default();
        Self {
            global: section.level.map(to_level).unwrap_or(defaults.global),
            rules: section.rules.map(to_level),
            scanner: section.scanner.map(to_level),
            queue: section.queue.map(to_level),
        }
    }

    /// Get log level for a specific phase
    pub fn level_for(&self, phase: Phase) -> Level {
        let level = match phase {
            Phase::Rules => self.rules,
            Phase::Scanner => self.scanner,
            Phase::Queue => self.queue,
        };
        level.unwrap_or(self.global)
    }
}

pub fn to_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    }
}
