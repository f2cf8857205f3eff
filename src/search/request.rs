//! Search request and pagination checks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;
use crate::error::{PolyglotError, Result};

fn default_page_size() -> i64 {
    10
}

/// A locale-qualified search request.
///
/// Offsets and sizes are signed so that negative values coming from
/// callers can be reported instead of wrapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub text: String,
    pub locale: String,
    /// Field equality filters; an array value matches any of its elements.
    #[serde(default)]
    pub filters: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub page_offset: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

impl SearchRequest {
    pub fn new<T: Into<String>, L: Into<String>>(text: T, locale: L) -> Self {
        SearchRequest {
            text: text.into(),
            locale: locale.into(),
            filters: BTreeMap::new(),
            page_offset: 0,
            page_size: default_page_size(),
        }
    }

    pub fn with_filter<K: Into<String>>(mut self, key: K, value: serde_json::Value) -> Self {
        self.filters.insert(key.into(), value);
        self
    }

    pub fn with_page(mut self, page_offset: i64, page_size: i64) -> Self {
        self.page_offset = page_offset;
        self.page_size = page_size;
        self
    }

    /// Validated `(offset, size)`.
    pub fn page(&self, limits: &PaginationConfig) -> Result<(usize, usize)> {
        let offset = usize::try_from(self.page_offset).map_err(|_| {
            PolyglotError::invalid_pagination(format!(
                "page_offset must not be negative, got {}",
                self.page_offset
            ))
        })?;
        let size = usize::try_from(self.page_size).unwrap_or(0);
        if size == 0 {
            return Err(PolyglotError::invalid_pagination(format!(
                "page_size must be at least 1, got {}",
                self.page_size
            )));
        }
        if size > limits.max_page_size {
            return Err(PolyglotError::invalid_pagination(format!(
                "page_size {size} exceeds the maximum of {}",
                limits.max_page_size
            )));
        }
        if offset.saturating_add(size) > limits.max_result_window {
            return Err(PolyglotError::invalid_pagination(format!(
                "page_offset + page_size must not exceed {}",
                limits.max_result_window
            )));
        }
        Ok((offset, size))
    }
}
