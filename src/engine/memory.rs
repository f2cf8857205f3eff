//! In-memory reference engine.
//!
//! Documents are analyzed with the profile of their locale, the same chain
//! the query normalizer uses. Scoring is a weighted log term frequency over
//! the query clauses; it only has to be plausible, not competitive.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use ahash::AHashMap;
use parking_lot::{Mutex, RwLock};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::SearchEngine;
use crate::engine::types::{EngineHit, EngineQuery, EngineResponse, StoredFields, WeightedClause};
use crate::error::{PolyglotError, Result};
use crate::locale::LocaleRegistry;

/// A document as stored in the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub locale: String,
    pub text: String,
    /// Exact-match filter fields.
    #[serde(default)]
    pub fields: BTreeMap<String, serde_json::Value>,
    #[serde(flatten)]
    pub stored: StoredFields,
}

impl Document {
    pub fn new<I, L, T>(id: I, locale: L, text: T) -> Self
    where
        I: Into<String>,
        L: Into<String>,
        T: Into<String>,
    {
        Document {
            id: id.into(),
            locale: locale.into(),
            text: text.into(),
            fields: BTreeMap::new(),
            stored: StoredFields::default(),
        }
    }

    pub fn with_field<K: Into<String>>(mut self, key: K, value: serde_json::Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn with_stored(mut self, stored: StoredFields) -> Self {
        self.stored = stored;
        self
    }
}

#[derive(Debug)]
struct IndexedDocument {
    document: Document,
    analyzer: String,
    tokens: Vec<String>,
    /// Tokens without stop words, for phrases whose stop words were removed
    /// at query time.
    content_tokens: Vec<String>,
    term_freqs: AHashMap<String, u32>,
}

fn phrase_count(tokens: &[String], phrase: &[&str]) -> u32 {
    if phrase.len() > tokens.len() {
        return 0;
    }
    tokens
        .windows(phrase.len())
        .filter(|w| w.iter().zip(phrase).all(|(t, p)| t == p))
        .count() as u32
}

impl IndexedDocument {
    /// Frequency of a term, or of a phrase as a contiguous token run.
    fn frequency(&self, clause: &WeightedClause) -> u32 {
        if !clause.phrase {
            return self.term_freqs.get(&clause.term).copied().unwrap_or(0);
        }

        let phrase: Vec<&str> = clause.term.split(' ').collect();
        phrase_count(&self.tokens, &phrase).max(phrase_count(&self.content_tokens, &phrase))
    }

    fn clause_score(&self, clause: &WeightedClause) -> Option<f64> {
        match self.frequency(clause) {
            0 => None,
            tf => Some(clause.weight * (1.0 + f64::from(tf).ln())),
        }
    }

    fn matches_filters(&self, filters: &BTreeMap<String, serde_json::Value>) -> bool {
        filters.iter().all(|(key, wanted)| {
            let Some(actual) = self.document.fields.get(key) else {
                return false;
            };
            match wanted {
                serde_json::Value::Array(any_of) => any_of.contains(actual),
                value => value == actual,
            }
        })
    }

    /// Score against a query; `None` when a clause is not satisfied.
    fn evaluate(&self, query: &EngineQuery) -> Option<(f64, Vec<String>)> {
        let mut score = 0.0;
        let mut matched = Vec::new();

        for clause in &query.must {
            score += self.clause_score(clause)?;
            matched.push(clause.term.clone());
        }

        for group in &query.should {
            let mut best: Option<f64> = None;
            for clause in group {
                if let Some(s) = self.clause_score(clause) {
                    matched.push(clause.term.clone());
                    best = Some(best.map_or(s, |b| b.max(s)));
                }
            }
            score += best?;
        }

        Some((score, matched))
    }
}

/// Engine holding analyzed documents in memory.
///
/// Availability and latency can be changed at runtime to simulate outages
/// and slow responses.
#[derive(Debug)]
pub struct InMemoryEngine {
    registry: Arc<LocaleRegistry>,
    documents: RwLock<Vec<IndexedDocument>>,
    available: AtomicBool,
    latency: Mutex<Option<Duration>>,
    completed: AtomicU64,
}

impl InMemoryEngine {
    pub fn new(registry: Arc<LocaleRegistry>) -> Self {
        InMemoryEngine {
            registry,
            documents: RwLock::new(Vec::new()),
            available: AtomicBool::new(true),
            latency: Mutex::new(None),
            completed: AtomicU64::new(0),
        }
    }

    /// Analyze and store a document.
    pub fn add_document(&self, document: Document) -> Result<()> {
        let profile = self.registry.resolve(&document.locale)?;
        let marked = profile.mark_stopwords(&document.text)?;
        let content_tokens: Vec<String> = marked
            .iter()
            .filter(|t| !t.is_stopped())
            .map(|t| t.text.clone())
            .collect();
        let tokens: Vec<String> = marked.into_iter().map(|t| t.text).collect();

        let mut term_freqs = AHashMap::new();
        for token in &tokens {
            *term_freqs.entry(token.clone()).or_insert(0) += 1;
        }

        self.documents.write().push(IndexedDocument {
            document,
            analyzer: profile.code().to_string(),
            tokens,
            content_tokens,
            term_freqs,
        });
        Ok(())
    }

    pub fn add_documents<I>(&self, documents: I) -> Result<usize>
    where
        I: IntoIterator<Item = Document>,
    {
        let mut count = 0;
        for document in documents {
            self.add_document(document)?;
            count += 1;
        }
        Ok(count)
    }

    /// Load a corpus with one JSON document per line. Blank lines are
    /// ignored.
    pub fn load_jsonl<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);

        let mut count = 0;
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let document: Document = serde_json::from_str(&line).map_err(|e| {
                PolyglotError::other(format!(
                    "{}:{}: invalid document: {e}",
                    path.display(),
                    line_no + 1
                ))
            })?;
            self.add_document(document)?;
            count += 1;
        }

        log::info!("loaded {count} documents from {}", path.display());
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Release);
    }

    /// Delay every query by `latency`.
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.lock() = latency;
    }

    /// Number of queries that ran to completion.
    pub fn completed_queries(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }

    fn search(&self, query: &EngineQuery) -> EngineResponse {
        let documents = self.documents.read();

        let mut hits: Vec<EngineHit> = documents
            .par_iter()
            .filter(|doc| doc.analyzer == query.analyzer && doc.matches_filters(&query.filters))
            .filter_map(|doc| {
                let (score, matched_terms) = doc.evaluate(query)?;
                Some(EngineHit {
                    document_id: doc.document.id.clone(),
                    score,
                    stored_fields: doc.document.stored.clone(),
                    matched_terms,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.document_id.cmp(&b.document_id))
        });

        let total = hits.len() as u64;
        let hits = hits.into_iter().skip(query.from).take(query.size).collect();
        EngineResponse { hits, total }
    }
}

impl SearchEngine for InMemoryEngine {
    async fn execute(&self, query: EngineQuery) -> Result<EngineResponse> {
        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if !self.available.load(Ordering::Acquire) {
            return Err(PolyglotError::search_unavailable("in-memory engine is offline"));
        }
        if !self.registry.contains(&query.analyzer) {
            return Err(PolyglotError::other(format!(
                "unknown analyzer '{}'",
                query.analyzer
            )));
        }
        if query.must.is_empty() && query.should.is_empty() {
            return Err(PolyglotError::other("refusing to run a query without clauses"));
        }

        let response = self.search(&query);
        self.completed.fetch_add(1, Ordering::AcqRel);
        Ok(response)
    }

    fn name(&self) -> &str {
        "in_memory"
    }
}
