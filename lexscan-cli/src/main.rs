//! lexscan CLI - tokenize a file with rules from a JSON manifest
//!
//! ```text
//! lexscan rules.json input.txt --format json
//! ```
//!
//! Exits with status 1 on scanner errors and when input remains that no rule
//! matches.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::{debug, info};

mod config;
mod logging;
mod platform;

use crate::config::{to_level, LogConfig, Manifest};
use crate::logging::{init_with_file, LogFormat};
use crate::platform::print_error_with_source;
use lexscan_config::LogLevel;
use lexscan_core::{ScanError, Scanner, SourcePosition, Token};

#[derive(Parser)]
#[command(
    name = "lexscan",
    about = "Rule-driven lexical scanner - tokenize a file",
    version
)]
struct Cli {
    /// Manifest with rules and scanner settings
    #[arg(value_name = "MANIFEST", default_value = "lexscan.json")]
    manifest: PathBuf,

    /// File to scan; standard input when omitted or `-`
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Token output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Override the manifest's global log level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Also append logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One token per line: kind, quoted value, location
    Text,
    /// Pretty-printed JSON array of tokens
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse manifest '{path}': {source}")]
    Manifest {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("no rule matches input at {position}: {snippet:?}")]
    Unmatched {
        position: SourcePosition,
        snippet: String,
    },
    #[error("cannot write output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Line and column in the scanned input, if the error has one
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            CliError::Scan(e) => e.line().zip(e.column()),
            CliError::Unmatched { position, .. } => Some((position.line, position.column)),
            _ => None,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let manifest = match read_manifest(&cli.manifest) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    let mut log_config = LogConfig::from_section(&manifest.log);
    if let Some(level) = cli.log_level {
        log_config.global = to_level(level.into());
    }
    if let Err(e) = init_with_file(&log_config, cli.log_format, cli.log_file.as_deref()) {
        eprintln!("error: {}", e);
        process::exit(1);
    }

    let source = match read_input(cli.input.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    let (tokens, outcome) = tokenize(&source, manifest);

    match render_tokens(&tokens, cli.format) {
        Ok(out) => print!("{}", out),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }

    if let Err(e) = outcome {
        print_error_with_source(&e, &source);
        process::exit(1);
    }
}

/// Read and parse the manifest
fn read_manifest(path: &Path) -> Result<Manifest, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_manifest(&content, path)
}

fn parse_manifest(content: &str, path: &Path) -> Result<Manifest, CliError> {
    serde_json::from_str(content).map_err(|source| CliError::Manifest {
        path: path.display().to_string(),
        source,
    })
}

/// Read the input file, or standard input for `None` and `-`
fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    let (bytes, name) = match path {
        Some(p) if p != Path::new("-") => {
            let bytes = std::fs::read(p).map_err(|source| CliError::Read {
                path: p.display().to_string(),
                source,
            })?;
            (bytes, p.display().to_string())
        }
        _ => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|source| CliError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            (bytes, "<stdin>".to_string())
        }
    };
    debug!(target: "lexscan::cli", input = %name, len = bytes.len(), "Read input");
    String::from_utf8(bytes).map_err(|e| ScanError::invalid_input(e.to_string()).into())
}

/// Scan the whole input
///
/// Returns the tokens produced before any failure, and the failure itself.
fn tokenize(source: &str, manifest: Manifest) -> (Vec<Token>, Result<(), CliError>) {
    let mut tokens = Vec::new();

    let mut scanner = match Scanner::builder(source)
        .config(manifest.scanner)
        .rules_input(manifest.rules)
    {
        Ok(builder) => builder.build(),
        Err(e) => return (tokens, Err(e.into())),
    };

    for token in scanner.tokens() {
        match token {
            Ok(token) => tokens.push(token),
            Err(e) => return (tokens, Err(e.into())),
        }
    }

    info!(target: "lexscan::cli", tokens = tokens.len(), "Scan finished");

    if !scanner.eos() {
        let snippet = scanner
            .remaining()
            .chars()
            .take(scanner.config().snippet_len)
            .collect();
        return (
            tokens,
            Err(CliError::Unmatched {
                position: scanner.location(),
                snippet,
            }),
        );
    }
    (tokens, Ok(()))
}

fn render_tokens(tokens: &[Token], format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(tokens
            .iter()
            .map(|t| format!("{:<12} {:?} @{}\n", t.kind, t.value, t.loc.start))
            .collect()),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(tokens)?;
            out.push('\n');
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(json: &str) -> Manifest {
        parse_manifest(json, Path::new("test.json")).unwrap()
    }

    const WORDS: &str = r#"{ "rules": { "word": "^\\w+", "space": "^\\s+" } }"#;

    #[test]
    fn test_tokenize_all() {
        let (tokens, outcome) = tokenize("hello world", manifest(WORDS));
        assert!(outcome.is_ok());
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_unmatched_input_reports_location() {
        let (tokens, outcome) = tokenize("ab\ncd ?!", manifest(WORDS));
        assert_eq!(tokens.len(), 4);
        let err = outcome.unwrap_err();
        assert!(matches!(err, CliError::Unmatched { .. }));
        assert_eq!(err.location(), Some((2, 4)));
        assert!(err.to_string().contains("\"?!\""));
    }

    #[test]
    fn test_scan_error_keeps_earlier_tokens() {
        let (tokens, outcome) = tokenize(
            "ab!",
            manifest(r#"{ "rules": { "word": "^\\w+", "dash": "^-?" } }"#),
        );
        assert_eq!(tokens.len(), 1);
        let err = outcome.unwrap_err();
        assert!(matches!(err, CliError::Scan(_)));
        assert_eq!(err.location(), Some((1, 3)));
    }

    #[test]
    fn test_bad_pattern_is_reported_before_scanning() {
        let (tokens, outcome) = tokenize("x", manifest(r#"{ "rules": { "bad": "^[" } }"#));
        assert!(tokens.is_empty());
        assert!(matches!(outcome, Err(CliError::Scan(_))));
    }

    #[test]
    fn test_manifest_error_names_file() {
        let err = parse_manifest("{ not json", Path::new("rules.json")).unwrap_err();
        assert!(err.to_string().starts_with("cannot parse manifest 'rules.json'"));
        assert_eq!(err.location(), None);
    }

    #[test]
    fn test_render_text() {
        let (tokens, _) = tokenize("a b", manifest(WORDS));
        let out = render_tokens(&tokens, OutputFormat::Text).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "word         \"a\" @1:1");
        assert_eq!(lines[1], "space        \" \" @1:2");
        assert_eq!(lines[2], "word         \"b\" @1:3");
    }

    #[test]
    fn test_render_json() {
        let (tokens, _) = tokenize("a", manifest(WORDS));
        let out = render_tokens(&tokens, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["kind"], "word");
        assert_eq!(value[0]["value"], "a");
        assert_eq!(value[0]["range"]["start"], 0);
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "lexscan",
            "rules.json",
            "input.txt",
            "--format",
            "json",
            "--log-format",
            "pretty",
            "--log-level",
            "trace",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.log_format, LogFormat::Pretty);
        assert_eq!(cli.log_level, Some(CliLogLevel::Trace));
        assert_eq!(cli.input, Some(PathBuf::from("input.txt")));
    }
}
