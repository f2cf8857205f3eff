//! Search orchestrator.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{PaginationConfig, ServiceConfig};
use crate::engine::SearchEngine;
use crate::error::{PolyglotError, Result};
use crate::locale::LocaleRegistry;
use crate::query::{ExpandedQuery, QueryExpander, QueryNormalizer};
use crate::ranking::{RawHit, RelevanceRanker};
use crate::search::request::SearchRequest;
use crate::search::result::SearchResult;
use crate::synonym::SynonymStore;
use crate::util::levenshtein::min_distance;

/// Runs searches: normalize, expand, query the engine, re-rank, paginate.
///
/// Holds no request state, so one instance can serve concurrent requests
/// behind an `Arc`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use polyglot_search::engine::{Document, InMemoryEngine};
/// use polyglot_search::locale::LocaleRegistry;
/// use polyglot_search::search::{SearchOrchestrator, SearchRequest};
///
/// # #[tokio::main]
/// # async fn main() {
/// let registry = Arc::new(LocaleRegistry::builtin().unwrap());
/// let engine = InMemoryEngine::new(Arc::clone(&registry));
/// engine.add_document(Document::new("d1", "en", "Algebra equations")).unwrap();
///
/// let orchestrator = SearchOrchestrator::new(registry, engine);
/// let result = orchestrator
///     .search(SearchRequest::new("algebra", "en"))
///     .await
///     .unwrap();
/// assert_eq!(result.document_ids(), vec!["d1"]);
/// # }
/// ```
#[derive(Debug)]
pub struct SearchOrchestrator<E> {
    registry: Arc<LocaleRegistry>,
    synonyms: Arc<SynonymStore>,
    normalizer: QueryNormalizer,
    expander: QueryExpander,
    ranker: RelevanceRanker,
    engine: E,
    timeout: Duration,
    pagination: PaginationConfig,
}

impl<E: SearchEngine> SearchOrchestrator<E> {
    /// An orchestrator with default settings and empty synonym tables.
    pub fn new(registry: Arc<LocaleRegistry>, engine: E) -> Self {
        let defaults = ServiceConfig::default();
        let synonyms = Arc::new(SynonymStore::new(Arc::clone(&registry)));
        SearchOrchestrator {
            normalizer: QueryNormalizer::new(Arc::clone(&registry)),
            expander: QueryExpander::new(Arc::clone(&synonyms)),
            ranker: RelevanceRanker::default(),
            registry,
            synonyms,
            engine,
            timeout: defaults.engine.timeout(),
            pagination: defaults.pagination,
        }
    }

    /// Build everything from configuration: locale registry, synonym tables
    /// and component settings. Any failure here is fatal at startup.
    pub fn from_config(config: &ServiceConfig, engine: E) -> Result<Self> {
        config.validate()?;
        let registry = Arc::new(config.build_registry()?);
        Self::from_parts(config, registry, engine)
    }

    /// Like [`from_config`](Self::from_config), sharing a registry that was
    /// already built, typically the one the engine analyzes documents with.
    pub fn from_parts(
        config: &ServiceConfig,
        registry: Arc<LocaleRegistry>,
        engine: E,
    ) -> Result<Self> {
        config.validate()?;
        let synonyms = Arc::new(SynonymStore::new(Arc::clone(&registry)));
        synonyms.load_all(&config.synonyms)?;

        Ok(SearchOrchestrator {
            normalizer: QueryNormalizer::with_config(
                Arc::clone(&registry),
                config.normalizer.clone(),
            ),
            expander: QueryExpander::with_config(Arc::clone(&synonyms), config.expansion.clone())?,
            ranker: RelevanceRanker::new(config.ranking.clone())?,
            registry,
            synonyms,
            engine,
            timeout: config.engine.timeout(),
            pagination: config.pagination.clone(),
        })
    }

    pub fn with_ranker(mut self, ranker: RelevanceRanker) -> Self {
        self.ranker = ranker;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run one search.
    ///
    /// Dropping the returned future drops the in-flight engine call with it.
    pub async fn search(&self, request: SearchRequest) -> Result<SearchResult> {
        let started = Instant::now();
        let profile = self.registry.resolve(&request.locale)?;
        let (offset, size) = request.page(&self.pagination)?;

        let normalized = self.normalizer.normalize(&request.text, profile.code())?;
        let expanded = self.expander.expand(&normalized)?;

        // Every page is cut from the same re-ranked candidate window, so
        // walking pages never skips or repeats a hit.
        let query = expanded
            .to_engine_query()
            .with_filters(request.filters)
            .with_window(0, self.pagination.max_result_window);

        let response = match tokio::time::timeout(self.timeout, self.engine.execute(query)).await
        {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                log::warn!("engine {} failed: {e}", self.engine.name());
                return Err(PolyglotError::search_unavailable(format!(
                    "engine {} failed: {e}",
                    self.engine.name()
                )));
            }
            Err(_) => {
                log::warn!(
                    "engine {} timed out after {:?}",
                    self.engine.name(),
                    self.timeout
                );
                return Err(PolyglotError::timeout(format!(
                    "engine {} did not answer within {:?}",
                    self.engine.name(),
                    self.timeout
                )));
            }
        };

        let hits = response
            .hits
            .into_iter()
            .map(|hit| {
                let distance = fuzzy_distance(&expanded, &hit.matched_terms);
                let mut raw = RawHit::from(hit);
                raw.fuzzy_distance = distance;
                raw
            })
            .collect();

        let hits: Vec<_> = self
            .ranker
            .rank(hits)
            .into_iter()
            .skip(offset)
            .take(size)
            .collect();

        log::debug!(
            "search locale={} terms={} total={} returned={} in {:?}",
            profile.code(),
            normalized.tokens.len(),
            response.total,
            hits.len(),
            started.elapsed()
        );

        Ok(SearchResult {
            hits,
            total_count: response.total,
            page_offset: offset,
            page_size: size,
        })
    }

    /// Run a search that is abandoned as soon as `cancel` completes.
    pub async fn search_cancellable<C>(
        &self,
        request: SearchRequest,
        cancel: C,
    ) -> Result<SearchResult>
    where
        C: Future<Output = ()>,
    {
        let locale = request.locale.clone();
        tokio::select! {
            biased;
            _ = cancel => {
                log::debug!("search for locale {locale} cancelled by caller");
                Err(PolyglotError::cancelled("search abandoned by caller"))
            }
            result = self.search(request) => result,
        }
    }

    /// Reload one locale's synonyms from a file. On failure the current
    /// table keeps serving and the error is returned to the caller.
    pub fn reload_synonyms<P: AsRef<Path>>(&self, locale: &str, path: P) -> Result<u64> {
        self.synonyms.reload_from_file(locale, path)
    }

    pub fn registry(&self) -> &Arc<LocaleRegistry> {
        &self.registry
    }

    pub fn synonyms(&self) -> &Arc<SynonymStore> {
        &self.synonyms
    }

    pub fn normalizer(&self) -> &QueryNormalizer {
        &self.normalizer
    }

    pub fn expander(&self) -> &QueryExpander {
        &self.expander
    }

    pub fn ranker(&self) -> &RelevanceRanker {
        &self.ranker
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

/// Distance between what the document matched and what the user typed.
///
/// Per expansion group, the closest matched member is compared with the
/// group's original; the distances are summed. `None` when the engine did
/// not report matched terms.
fn fuzzy_distance(expanded: &ExpandedQuery, matched_terms: &[String]) -> Option<usize> {
    if matched_terms.is_empty() {
        return None;
    }

    let distance = expanded
        .expansion_groups
        .iter()
        .filter_map(|group| {
            min_distance(
                matched_terms
                    .iter()
                    .map(String::as_str)
                    .filter(|term| group.contains(term)),
                std::iter::once(group.original.term.as_str()),
            )
        })
        .sum();
    Some(distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ExpansionGroup;

    #[test]
    fn test_fuzzy_distance_per_group() {
        let mut algebra = ExpansionGroup::new("algebra");
        algebra.push_synonym("algebraic math", 0.7);
        let expanded =
            ExpandedQuery::from_groups("en", vec![algebra, ExpansionGroup::new("equations")]);

        let exact = ["algebra".to_string(), "equations".to_string()];
        assert_eq!(fuzzy_distance(&expanded, &exact), Some(0));

        let via_synonym = ["equations".to_string(), "algebraic math".to_string()];
        assert_eq!(fuzzy_distance(&expanded, &via_synonym), Some(7));

        // Both alternatives matched: the original wins.
        let both = ["algebraic math".to_string(), "algebra".to_string()];
        assert_eq!(fuzzy_distance(&expanded, &both), Some(0));

        assert_eq!(fuzzy_distance(&expanded, &[]), None);
    }
}
