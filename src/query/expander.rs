//! Query expander: normalized tokens to weighted expansion groups.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{PolyglotError, Result};
use crate::query::types::{ExpandedQuery, ExpansionGroup, NormalizedQuery};
use crate::synonym::{SynonymStore, SynonymTable};

/// Expansion settings, fixed per deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    /// Weight of every synonym alternative; originals weigh 1.0.
    pub synonym_weight: f64,
    pub max_synonyms_per_term: usize,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        ExpansionConfig {
            synonym_weight: 0.7,
            max_synonyms_per_term: 8,
        }
    }
}

impl ExpansionConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.synonym_weight.is_finite()
            && self.synonym_weight > 0.0
            && self.synonym_weight < 1.0)
        {
            return Err(PolyglotError::config(format!(
                "synonym_weight must be in (0, 1), got {}",
                self.synonym_weight
            )));
        }
        Ok(())
    }
}

/// Expands normalized queries with the synonyms of their locale.
#[derive(Debug, Clone)]
pub struct QueryExpander {
    store: Arc<SynonymStore>,
    config: ExpansionConfig,
}

impl QueryExpander {
    pub fn new(store: Arc<SynonymStore>) -> Self {
        QueryExpander {
            store,
            config: ExpansionConfig::default(),
        }
    }

    pub fn with_config(store: Arc<SynonymStore>, config: ExpansionConfig) -> Result<Self> {
        config.validate()?;
        Ok(QueryExpander { store, config })
    }

    /// Expand a query against one snapshot of its locale's synonym table.
    pub fn expand(&self, query: &NormalizedQuery) -> Result<ExpandedQuery> {
        let table = self.store.snapshot(&query.locale)?;
        Ok(self.expand_with(&table, query))
    }

    /// Expand a query against a given table.
    ///
    /// Canonical phrases are matched greedily, longest first, so
    /// "machine learning" is looked up before "machine". Only the user's
    /// terms are looked up; synonyms are never expanded again.
    pub fn expand_with(&self, table: &SynonymTable, query: &NormalizedQuery) -> ExpandedQuery {
        let tokens = &query.tokens;
        let mut groups = Vec::with_capacity(tokens.len());
        let mut i = 0;

        while i < tokens.len() {
            let longest = table.max_phrase_len().min(tokens.len() - i);
            let (original, consumed) = (2..=longest)
                .rev()
                .map(|len| (tokens[i..i + len].join(" "), len))
                .find(|(phrase, _)| table.contains(phrase))
                .unwrap_or_else(|| (tokens[i].clone(), 1));

            groups.push(self.group(original, table));
            i += consumed;
        }

        ExpandedQuery::from_groups(query.locale.clone(), groups)
    }

    fn group(&self, original: String, table: &SynonymTable) -> ExpansionGroup {
        let synonyms = table.lookup(&original);
        let mut group = ExpansionGroup::new(original);
        for synonym in synonyms {
            if group.synonyms.len() >= self.config.max_synonyms_per_term {
                log::debug!(
                    "'{}' has {} synonyms, keeping {}",
                    group.original.term,
                    synonyms.len(),
                    self.config.max_synonyms_per_term
                );
                break;
            }
            group.push_synonym(synonym.clone(), self.config.synonym_weight);
        }
        group
    }

    pub fn config(&self) -> &ExpansionConfig {
        &self.config
    }
}
