//! Per-request query representations.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::engine::{EngineQuery, WeightedClause};

/// Weight carried by the term the user typed.
pub const ORIGINAL_TERM_WEIGHT: f64 = 1.0;

/// Output of the normalizer. `tokens` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedQuery {
    /// Canonical code of the resolved locale.
    pub locale: String,
    pub tokens: Vec<String>,
    pub original_text: String,
}

impl NormalizedQuery {
    /// Tokens joined by single spaces. Normalizing this text again yields
    /// the same tokens.
    pub fn canonical_text(&self) -> String {
        self.tokens.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedTerm {
    pub term: String,
    pub weight: f64,
}

impl WeightedTerm {
    pub fn new<S: Into<String>>(term: S, weight: f64) -> Self {
        WeightedTerm {
            term: term.into(),
            weight,
        }
    }

    /// Multi-word alternatives are matched as a unit.
    pub fn is_phrase(&self) -> bool {
        self.term.contains(' ')
    }

    fn to_clause(&self) -> WeightedClause {
        WeightedClause::new(self.term.clone(), self.weight)
    }
}

/// The original term with its interchangeable synonyms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionGroup {
    pub original: WeightedTerm,
    pub synonyms: Vec<WeightedTerm>,
}

impl ExpansionGroup {
    pub fn new<S: Into<String>>(original: S) -> Self {
        ExpansionGroup {
            original: WeightedTerm::new(original, ORIGINAL_TERM_WEIGHT),
            synonyms: Vec::new(),
        }
    }

    /// Add an alternative unless an equal term is already in the group.
    pub fn push_synonym<S: Into<String>>(&mut self, term: S, weight: f64) -> bool {
        let term = term.into();
        if self.contains(&term) {
            return false;
        }
        self.synonyms.push(WeightedTerm::new(term, weight));
        true
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms().any(|t| t.term == term)
    }

    /// Original first, then synonyms in table order.
    pub fn terms(&self) -> impl Iterator<Item = &WeightedTerm> {
        std::iter::once(&self.original).chain(self.synonyms.iter())
    }

    /// `(term, weight)` pairs in group order.
    pub fn weights(&self) -> Vec<(&str, f64)> {
        self.terms().map(|t| (t.term.as_str(), t.weight)).collect()
    }

    pub fn has_synonyms(&self) -> bool {
        !self.synonyms.is_empty()
    }
}

/// Expansion groups of one query. Every group must be satisfied by at
/// least one of its terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedQuery {
    pub locale: String,
    /// Originals of all groups.
    pub required_terms: BTreeSet<String>,
    pub expansion_groups: Vec<ExpansionGroup>,
}

impl ExpandedQuery {
    pub fn from_groups<S: Into<String>>(locale: S, expansion_groups: Vec<ExpansionGroup>) -> Self {
        let required_terms = expansion_groups
            .iter()
            .map(|g| g.original.term.clone())
            .collect();
        ExpandedQuery {
            locale: locale.into(),
            required_terms,
            expansion_groups,
        }
    }

    /// Every term of every group, originals included.
    pub fn all_terms(&self) -> impl Iterator<Item = &str> {
        self.expansion_groups
            .iter()
            .flat_map(|g| g.terms())
            .map(|t| t.term.as_str())
    }

    /// Build the structured engine query.
    ///
    /// Groups without synonyms become `must` clauses; groups with synonyms
    /// become `should` groups. The window is left empty for the caller.
    pub fn to_engine_query(&self) -> EngineQuery {
        let mut must = Vec::new();
        let mut should = Vec::new();

        for group in &self.expansion_groups {
            if group.has_synonyms() {
                should.push(group.terms().map(WeightedTerm::to_clause).collect());
            } else {
                must.push(group.original.to_clause());
            }
        }

        EngineQuery {
            must,
            should,
            filters: BTreeMap::new(),
            analyzer: self.locale.clone(),
            from: 0,
            size: 0,
        }
    }
}
