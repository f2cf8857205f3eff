//! Command line argument parsing for the polyglot CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// polyglot - multilingual query analysis, expansion and ranked search
#[derive(Parser, Debug, Clone)]
#[command(name = "polyglot")]
#[command(about = "Multilingual query analysis, synonym expansion and ranked search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PolyglotArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Service configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "POLYGLOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PolyglotArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List supported locales
    Locales,

    /// Show how a query is normalized for a locale
    Analyze(AnalyzeArgs),

    /// Show the synonym expansion and engine query for a query
    Expand(ExpandArgs),

    /// Search a JSONL corpus with the in-memory engine
    Search(SearchArgs),
}

/// Arguments for analyzing text
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Locale code, e.g. en, ar, zh-Hans
    #[arg(value_name = "LOCALE")]
    pub locale: String,

    /// Text to analyze
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Keep stop words (document analysis instead of query normalization)
    #[arg(long)]
    pub keep_stopwords: bool,
}

/// Arguments for expanding a query
#[derive(Parser, Debug, Clone)]
pub struct ExpandArgs {
    #[arg(value_name = "LOCALE")]
    pub locale: String,

    #[arg(value_name = "QUERY")]
    pub query: String,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Corpus file with one JSON document per line
    #[arg(value_name = "CORPUS_FILE")]
    pub corpus: PathBuf,

    #[arg(value_name = "LOCALE")]
    pub locale: String,

    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Offset of the first hit
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub offset: i64,

    /// Number of hits per page
    #[arg(short, long, default_value = "10", allow_negative_numbers = true)]
    pub size: i64,

    /// Field filter as key=value; repeat for several fields
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, serde_json::Value)>,

    /// Override the engine timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

/// Parse `key=value`. Values that are valid JSON keep their type, anything
/// else is taken as a string.
pub fn parse_filter(s: &str) -> Result<(String, serde_json::Value), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("filter '{s}' must look like key=value"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("filter '{s}' has an empty key"));
    }
    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_verbosity() {
        let args = PolyglotArgs::try_parse_from(["polyglot", "locales"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = PolyglotArgs::try_parse_from(["polyglot", "-vv", "locales"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = PolyglotArgs::try_parse_from(["polyglot", "--quiet", "-v", "locales"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            PolyglotArgs::try_parse_from(["polyglot", "--format", "json", "locales"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_search_args() {
        let args = PolyglotArgs::try_parse_from([
            "polyglot",
            "search",
            "corpus.jsonl",
            "en",
            "algebra equations",
            "--offset",
            "-1",
            "--filter",
            "subject=math",
            "--filter",
            "level=3",
        ])
        .unwrap();

        let Command::Search(search) = args.command else {
            panic!("expected search command");
        };
        assert_eq!(search.offset, -1);
        assert_eq!(search.size, 10);
        assert_eq!(
            search.filters,
            vec![
                ("subject".to_string(), json!("math")),
                ("level".to_string(), json!(3)),
            ]
        );
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("tags=[\"a\",\"b\"]").unwrap(),
            ("tags".to_string(), json!(["a", "b"]))
        );
        assert!(parse_filter("novalue").is_err());
        assert!(parse_filter("=x").is_err());
    }
}
