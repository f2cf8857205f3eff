//! # polyglot-search
//!
//! Query orchestration and relevance ranking for a multilingual content
//! index.
//!
//! ## Features
//!
//! - Per-locale analysis profiles for 14 languages, including right-to-left
//!   scripts and bigram segmentation for Chinese and Japanese
//! - Synonym expansion with weighted alternatives and atomic per-locale
//!   reload
//! - Structured engine queries behind a pluggable [`engine::SearchEngine`]
//! - Composite ranking that blends text relevance with bounded recency,
//!   popularity, completion and fuzzy-match signals
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use polyglot_search::engine::{Document, InMemoryEngine};
//! use polyglot_search::locale::LocaleRegistry;
//! use polyglot_search::search::{SearchOrchestrator, SearchRequest};
//! use polyglot_search::synonym::SynonymEntry;
//!
//! # #[tokio::main]
//! # async fn main() -> polyglot_search::error::Result<()> {
//! let registry = Arc::new(LocaleRegistry::builtin()?);
//! let engine = InMemoryEngine::new(Arc::clone(&registry));
//! engine.add_document(Document::new("intro", "en", "Algebraic math for everyone"))?;
//!
//! let orchestrator = SearchOrchestrator::new(registry, engine);
//! orchestrator
//!     .synonyms()
//!     .reload_entries("en", vec![SynonymEntry::new("algebra", vec!["algebraic math"])?])?;
//!
//! let result = orchestrator.search(SearchRequest::new("Algebra", "en")).await?;
//! assert_eq!(result.document_ids(), vec!["intro"]);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod locale;
pub mod query;
pub mod ranking;
pub mod search;
pub mod synonym;
pub mod util;

pub mod prelude {
    pub use crate::config::ServiceConfig;
    pub use crate::engine::{Document, EngineQuery, EngineResponse, InMemoryEngine, SearchEngine};
    pub use crate::error::{ErrorKind, PolyglotError, Result};
    pub use crate::locale::{LocaleProfile, LocaleRegistry};
    pub use crate::query::{ExpandedQuery, NormalizedQuery, QueryExpander, QueryNormalizer};
    pub use crate::ranking::{RankingWeights, RelevanceRanker, ScoredHit};
    pub use crate::search::{SearchOrchestrator, SearchRequest, SearchResult};
    pub use crate::synonym::{SynonymEntry, SynonymStore, SynonymTable};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
