//! Structured query and response types exchanged with the search engine.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One weighted term or phrase clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedClause {
    /// Analyzed term text; phrases are tokens joined by single spaces.
    pub term: String,
    pub weight: f64,
    /// Whether `term` must match as a contiguous phrase.
    #[serde(default)]
    pub phrase: bool,
}

impl WeightedClause {
    pub fn new<S: Into<String>>(term: S, weight: f64) -> Self {
        let term = term.into();
        let phrase = term.contains(' ');
        WeightedClause {
            term,
            weight,
            phrase,
        }
    }
}

/// Structured query issued to the engine. Raw query strings are never sent.
///
/// Every `must` clause has to match. Each inner list of `should` is a group
/// of alternatives of which at least one has to match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineQuery {
    pub must: Vec<WeightedClause>,
    pub should: Vec<Vec<WeightedClause>>,
    #[serde(default)]
    pub filters: BTreeMap<String, serde_json::Value>,
    /// Analyzer name, which is the locale code.
    pub analyzer: String,
    pub from: usize,
    pub size: usize,
}

impl EngineQuery {
    /// All query terms, originals and alternatives.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.must
            .iter()
            .chain(self.should.iter().flatten())
            .map(|c| c.term.as_str())
    }

    pub fn with_filters(mut self, filters: BTreeMap<String, serde_json::Value>) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_window(mut self, from: usize, size: usize) -> Self {
        self.from = from;
        self.size = size;
        self
    }
}

/// Contextual signals stored alongside each document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredFields {
    #[serde(default)]
    pub recency_ts: Option<DateTime<Utc>>,
    #[serde(default)]
    pub popularity: u64,
    #[serde(default)]
    pub completion_rate: f64,
}

/// One scored hit as returned by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineHit {
    pub document_id: String,
    pub score: f64,
    #[serde(default)]
    pub stored_fields: StoredFields,
    /// Terms of the document that satisfied the query, when reported.
    #[serde(default)]
    pub matched_terms: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineResponse {
    pub hits: Vec<EngineHit>,
    /// Number of matching documents, not just those returned.
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_phrase_flag() {
        assert!(!WeightedClause::new("algebra", 1.0).phrase);
        assert!(WeightedClause::new("algebraic math", 0.7).phrase);
    }

    #[test]
    fn test_hit_deserializes_with_missing_fields() {
        let hit: EngineHit = serde_json::from_str(
            r#"{"document_id": "d1", "score": 2.5, "stored_fields": {"popularity": 10}}"#,
        )
        .unwrap();
        assert_eq!(hit.stored_fields.popularity, 10);
        assert!(hit.stored_fields.recency_ts.is_none());
        assert!(hit.matched_terms.is_empty());
    }
}
