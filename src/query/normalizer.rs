//! Query normalizer: raw text to locale-analyzed tokens.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::error::{PolyglotError, Result};
use crate::locale::LocaleRegistry;
use crate::query::types::NormalizedQuery;

/// Normalizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Queries with more tokens are truncated.
    pub max_query_terms: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            max_query_terms: 32,
        }
    }
}

/// Turns raw user input into a [`NormalizedQuery`] using the locale's
/// profile.
#[derive(Debug, Clone)]
pub struct QueryNormalizer {
    registry: Arc<LocaleRegistry>,
    config: NormalizerConfig,
}

impl QueryNormalizer {
    pub fn new(registry: Arc<LocaleRegistry>) -> Self {
        Self::with_config(registry, NormalizerConfig::default())
    }

    pub fn with_config(registry: Arc<LocaleRegistry>, config: NormalizerConfig) -> Self {
        QueryNormalizer { registry, config }
    }

    /// Normalize `raw_text` for `locale`.
    ///
    /// Stop words are removed as long as something else remains. Input with
    /// no searchable token, or with nothing but stop words, fails with
    /// [`PolyglotError::EmptyQuery`]; it never turns into a match-all.
    pub fn normalize(&self, raw_text: &str, locale: &str) -> Result<NormalizedQuery> {
        let profile = self.registry.resolve(locale)?;

        let marked = profile.mark_stopwords(raw_text)?;
        if marked.is_empty() {
            return Err(PolyglotError::empty_query(format!(
                "no searchable terms in {raw_text:?} for locale {}",
                profile.code()
            )));
        }
        if marked.iter().all(Token::is_stopped) {
            return Err(PolyglotError::empty_query(format!(
                "only stop words in {raw_text:?} for locale {}",
                profile.code()
            )));
        }

        let mut tokens: Vec<String> = marked
            .into_iter()
            .filter(|t| !t.is_stopped())
            .map(|t| t.text)
            .collect();

        if tokens.len() > self.config.max_query_terms {
            log::debug!(
                "query truncated from {} to {} terms",
                tokens.len(),
                self.config.max_query_terms
            );
            tokens.truncate(self.config.max_query_terms);
        }

        Ok(NormalizedQuery {
            locale: profile.code().to_string(),
            tokens,
            original_text: raw_text.to_string(),
        })
    }

    /// Analyze text without stop word removal, as documents and synonym
    /// keys are analyzed.
    pub fn analyze_text(&self, text: &str, locale: &str) -> Result<Vec<String>> {
        let profile = self.registry.resolve(locale)?;
        Ok(profile.analyze(text)?.into_iter().map(|t| t.text).collect())
    }

    pub fn registry(&self) -> &Arc<LocaleRegistry> {
        &self.registry
    }
}
