//! Search result page.

use serde::{Deserialize, Serialize};

use crate::ranking::ScoredHit;

/// One page of ranked hits. Built fresh for every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub hits: Vec<ScoredHit>,
    /// Matches reported by the engine, across all pages.
    pub total_count: u64,
    pub page_offset: usize,
    pub page_size: usize,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Whether the engine reported matches beyond this page.
    pub fn has_more(&self) -> bool {
        ((self.page_offset + self.hits.len()) as u64) < self.total_count
    }

    pub fn document_ids(&self) -> Vec<&str> {
        self.hits.iter().map(|h| h.document_id.as_str()).collect()
    }
}
