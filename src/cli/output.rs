//! Output formatting for CLI commands.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, PolyglotArgs};
use crate::engine::EngineQuery;
use crate::error::Result;
use crate::query::{ExpandedQuery, NormalizedQuery};
use crate::search::SearchResult;

/// Results that can be printed for humans as well as in JSON.
pub trait HumanReadable {
    fn to_human(&self) -> String;
}

/// One row of the `locales` listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct LocaleSummary {
    pub code: String,
    pub script_direction: String,
    pub tokenizer: String,
    pub stemming_enabled: bool,
    pub strip_diacritics: bool,
    pub stopwords: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LocaleList {
    pub locales: Vec<LocaleSummary>,
}

impl HumanReadable for LocaleList {
    fn to_human(&self) -> String {
        let mut out = format!(
            "{:<10} {:<4} {:<13} {:<5} {:<9} {}\n",
            "CODE", "DIR", "TOKENIZER", "STEM", "DIACRIT.", "STOPWORDS"
        );
        for l in &self.locales {
            let _ = writeln!(
                out,
                "{:<10} {:<4} {:<13} {:<5} {:<9} {}",
                l.code,
                l.script_direction,
                l.tokenizer,
                if l.stemming_enabled { "yes" } else { "no" },
                if l.strip_diacritics { "strip" } else { "keep" },
                l.stopwords
            );
        }
        out
    }
}

/// Result of the `analyze` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub locale: String,
    pub tokens: Vec<String>,
}

impl HumanReadable for AnalysisOutput {
    fn to_human(&self) -> String {
        format!("[{}] {}\n", self.locale, self.tokens.join(" | "))
    }
}

/// Result of the `expand` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpansionOutput {
    pub normalized: NormalizedQuery,
    pub expanded: ExpandedQuery,
    pub engine_query: EngineQuery,
}

impl HumanReadable for ExpansionOutput {
    fn to_human(&self) -> String {
        let mut out = format!(
            "Locale: {}\nTokens: {}\nGroups:\n",
            self.normalized.locale,
            self.normalized.tokens.join(" | ")
        );
        for (i, group) in self.expanded.expansion_groups.iter().enumerate() {
            let terms: Vec<String> = group
                .terms()
                .map(|t| format!("{} ({:.2})", t.term, t.weight))
                .collect();
            let _ = writeln!(out, "  {}. {}", i + 1, terms.join(", "));
        }
        let _ = writeln!(
            out,
            "Engine query: {} must, {} should groups, analyzer {}",
            self.engine_query.must.len(),
            self.engine_query.should.len(),
            self.engine_query.analyzer
        );
        out
    }
}

/// Result of the `search` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchOutput {
    pub result: SearchResult,
    pub duration_ms: u64,
}

impl HumanReadable for SearchOutput {
    fn to_human(&self) -> String {
        let result = &self.result;
        let mut out = format!(
            "{} of {} hits (offset {}) in {} ms\n",
            result.hits.len(),
            result.total_count,
            result.page_offset,
            self.duration_ms
        );
        for (i, hit) in result.hits.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}. {:<20} final {:>8.4}  text {:>8.4}  popularity {:>7}  completion {:.2}",
                result.page_offset + i + 1,
                hit.document_id,
                hit.final_score,
                hit.base_text_score,
                hit.popularity,
                hit.completion_rate
            );
        }
        out
    }
}

/// Output a result in the selected format.
pub fn output_result<T>(result: &T, args: &PolyglotArgs) -> Result<()>
where
    T: Serialize + HumanReadable,
{
    match args.output_format {
        OutputFormat::Human => {
            print!("{}", result.to_human());
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

fn output_json<T: Serialize>(result: &T, args: &PolyglotArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}
