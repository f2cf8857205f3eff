//! Criterion benchmarks for the polyglot search pipeline.
//!
//! Covers query normalization across scripts, synonym expansion, ranking
//! and a full search over the in-memory engine.

use std::hint::black_box;
use std::sync::Arc;

use chrono::{Duration, Utc};
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use polyglot_search::engine::{Document, InMemoryEngine, StoredFields};
use polyglot_search::locale::LocaleRegistry;
use polyglot_search::query::{QueryExpander, QueryNormalizer};
use polyglot_search::ranking::{RawHit, RelevanceRanker};
use polyglot_search::search::{SearchOrchestrator, SearchRequest};
use polyglot_search::synonym::{SynonymEntry, SynonymStore};

const WORDS: &[&str] = &[
    "algebra", "geometry", "calculus", "equations", "functions", "vectors", "matrices",
    "probability", "statistics", "chemistry", "biology", "physics", "history", "grammar",
    "reading", "writing", "fractions", "decimals", "integrals", "derivatives",
];

/// Generate course descriptions for benchmarking.
fn generate_test_documents(count: usize) -> Vec<Document> {
    let now = Utc::now();
    (0..count)
        .map(|i| {
            let length = 8 + (i % 24);
            let text: Vec<&str> = (0..length)
                .map(|j| WORDS[(i * 7 + j * 13) % WORDS.len()])
                .collect();
            Document::new(format!("doc-{i:05}"), "en", text.join(" ")).with_stored(StoredFields {
                recency_ts: Some(now - Duration::days((i % 400) as i64)),
                popularity: (i as u64 * 37) % 250_000,
                completion_rate: (i % 100) as f64 / 100.0,
            })
        })
        .collect()
}

fn synonym_store(registry: &Arc<LocaleRegistry>) -> Arc<SynonymStore> {
    let store = Arc::new(SynonymStore::new(Arc::clone(registry)));
    store
        .reload_entries(
            "en",
            vec![
                SynonymEntry::new("algebra", vec!["algebraic math", "equations"]).unwrap(),
                SynonymEntry::new("calculus", vec!["integrals", "derivatives"]).unwrap(),
                SynonymEntry::new("statistics", vec!["probability"]).unwrap(),
            ],
        )
        .unwrap();
    store
}

/// Benchmark query normalization for several scripts.
fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");
    let normalizer = QueryNormalizer::new(Arc::new(LocaleRegistry::builtin().unwrap()));

    for (locale, text) in [
        ("en", "Introduction to the Algebra of Linear Equations"),
        ("fr", "Introduction à l'algèbre et aux équations"),
        ("ar", "مقدمة في علم الجبر والمعادلات"),
        ("zh-Hans", "线性代数与神经网络入门"),
    ] {
        group.bench_function(format!("normalize_{locale}"), |b| {
            b.iter(|| black_box(normalizer.normalize(black_box(text), locale)))
        });
    }

    group.finish();
}

/// Benchmark synonym expansion.
fn bench_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("expansion");
    let registry = Arc::new(LocaleRegistry::builtin().unwrap());
    let normalizer = QueryNormalizer::new(Arc::clone(&registry));
    let expander = QueryExpander::new(synonym_store(&registry));
    let query = normalizer
        .normalize("algebra calculus statistics geometry", "en")
        .unwrap();

    group.bench_function("expand_four_terms", |b| {
        b.iter(|| black_box(expander.expand(black_box(&query))))
    });

    group.finish();
}

/// Benchmark ranking of engine hits.
fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");
    let ranker = RelevanceRanker::default();
    let now = Utc::now();
    let hits: Vec<RawHit> = (0..1000)
        .map(|i| {
            RawHit::new(format!("doc-{i:05}"), (i % 17) as f64)
                .with_recency(now - Duration::days(i % 365))
                .with_popularity((i as u64 * 101) % 500_000)
                .with_completion_rate((i % 10) as f64 / 10.0)
                .with_fuzzy_distance((i % 4) as usize)
        })
        .collect();

    group.throughput(Throughput::Elements(hits.len() as u64));
    group.bench_function("rank_1000_hits", |b| {
        b.iter_with_setup(|| hits.clone(), |hits| black_box(ranker.rank_at(hits, now)))
    });

    group.finish();
}

/// Benchmark a full search through the orchestrator.
fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(20);

    let registry = Arc::new(LocaleRegistry::builtin().unwrap());
    let engine = InMemoryEngine::new(Arc::clone(&registry));
    engine.add_documents(generate_test_documents(5000)).unwrap();
    let orchestrator = SearchOrchestrator::new(Arc::clone(&registry), engine);
    orchestrator
        .synonyms()
        .reload_entries(
            "en",
            vec![SynonymEntry::new("algebra", vec!["algebraic math", "equations"]).unwrap()],
        )
        .unwrap();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();

    group.bench_function("search_5000_documents", |b| {
        b.iter(|| {
            let request = SearchRequest::new("algebra functions", "en").with_page(0, 20);
            black_box(runtime.block_on(orchestrator.search(request)))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_normalization,
    bench_expansion,
    bench_ranking,
    bench_search
);
criterion_main!(benches);
