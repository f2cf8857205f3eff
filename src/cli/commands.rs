//! Command implementations for the polyglot CLI.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ServiceConfig;
use crate::engine::InMemoryEngine;
use crate::error::{PolyglotError, Result};
use crate::locale::{LocaleRegistry, ScriptDirection, TokenizerKind};
use crate::query::{QueryExpander, QueryNormalizer};
use crate::search::{SearchOrchestrator, SearchRequest};
use crate::synonym::SynonymStore;

/// Execute a CLI command.
pub fn execute_command(args: PolyglotArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Locales => list_locales(&config, &args),
        Command::Analyze(analyze_args) => analyze(analyze_args, &config, &args),
        Command::Expand(expand_args) => expand(expand_args, &config, &args),
        Command::Search(search_args) => search(search_args, &config, &args),
    }
}

fn load_config(args: &PolyglotArgs) -> Result<ServiceConfig> {
    match &args.config {
        Some(path) => {
            log::info!("loading configuration from {}", path.display());
            ServiceConfig::load(path)
        }
        None => Ok(ServiceConfig::default()),
    }
}

fn list_locales(config: &ServiceConfig, cli_args: &PolyglotArgs) -> Result<()> {
    let registry = config.build_registry()?;
    let locales = registry
        .profiles()
        .iter()
        .map(|p| LocaleSummary {
            code: p.code().to_string(),
            script_direction: match p.script_direction() {
                ScriptDirection::Ltr => "ltr",
                ScriptDirection::Rtl => "rtl",
            }
            .to_string(),
            tokenizer: match p.tokenizer() {
                TokenizerKind::UnicodeWord => "unicode_word",
                TokenizerKind::Whitespace => "whitespace",
                TokenizerKind::CjkBigram => "cjk_bigram",
            }
            .to_string(),
            stemming_enabled: p.stemming_enabled(),
            strip_diacritics: p.strip_diacritics(),
            stopwords: p.stopwords().len(),
        })
        .collect();

    output_result(&LocaleList { locales }, cli_args)
}

fn analyze(args: &AnalyzeArgs, config: &ServiceConfig, cli_args: &PolyglotArgs) -> Result<()> {
    let registry = Arc::new(config.build_registry()?);
    let normalizer = QueryNormalizer::with_config(Arc::clone(&registry), config.normalizer.clone());

    let output = if args.keep_stopwords {
        AnalysisOutput {
            locale: registry.resolve(&args.locale)?.code().to_string(),
            tokens: normalizer.analyze_text(&args.text, &args.locale)?,
        }
    } else {
        let normalized = normalizer.normalize(&args.text, &args.locale)?;
        AnalysisOutput {
            locale: normalized.locale,
            tokens: normalized.tokens,
        }
    };

    output_result(&output, cli_args)
}

fn expand(args: &ExpandArgs, config: &ServiceConfig, cli_args: &PolyglotArgs) -> Result<()> {
    let registry = Arc::new(config.build_registry()?);
    let synonyms = Arc::new(SynonymStore::new(Arc::clone(&registry)));
    synonyms.load_all(&config.synonyms)?;

    let normalizer = QueryNormalizer::with_config(Arc::clone(&registry), config.normalizer.clone());
    let expander = QueryExpander::with_config(synonyms, config.expansion.clone())?;

    let normalized = normalizer.normalize(&args.query, &args.locale)?;
    let expanded = expander.expand(&normalized)?;
    let engine_query = expanded.to_engine_query();

    output_result(
        &ExpansionOutput {
            normalized,
            expanded,
            engine_query,
        },
        cli_args,
    )
}

fn search(args: &SearchArgs, config: &ServiceConfig, cli_args: &PolyglotArgs) -> Result<()> {
    let registry = Arc::new(config.build_registry()?);
    let engine = InMemoryEngine::new(Arc::clone(&registry));
    let loaded = engine.load_jsonl(&args.corpus)?;
    if cli_args.verbosity() > 1 {
        eprintln!("Loaded {loaded} documents from {}", args.corpus.display());
    }

    let mut orchestrator = SearchOrchestrator::from_parts(config, registry, engine)?;
    if let Some(timeout_ms) = args.timeout_ms {
        orchestrator = orchestrator.with_timeout(Duration::from_millis(timeout_ms));
    }

    let mut request =
        SearchRequest::new(args.query.clone(), args.locale.clone()).with_page(args.offset, args.size);
    for (key, value) in &args.filters {
        request = request.with_filter(key.clone(), value.clone());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| PolyglotError::other(format!("failed to start async runtime: {e}")))?;

    let start_time = Instant::now();
    let result = runtime.block_on(orchestrator.search(request))?;
    let duration_ms = start_time.elapsed().as_millis() as u64;

    output_result(
        &SearchOutput {
            result,
            duration_ms,
        },
        cli_args,
    )
}
