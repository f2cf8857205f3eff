//! Relevance ranker.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::EngineHit;
use crate::error::Result;
use crate::ranking::signals::{
    completion_signal, fuzzy_proximity, popularity_signal, recency_decay,
};
use crate::ranking::weights::RankingWeights;

/// A hit with its text score and contextual signals, before ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHit {
    pub document_id: String,
    pub base_text_score: f64,
    pub recency_ts: Option<DateTime<Utc>>,
    pub popularity: u64,
    pub completion_rate: f64,
    /// Edit distance between matched and typed terms, when known.
    pub fuzzy_distance: Option<usize>,
}

impl RawHit {
    pub fn new<S: Into<String>>(document_id: S, base_text_score: f64) -> Self {
        RawHit {
            document_id: document_id.into(),
            base_text_score,
            recency_ts: None,
            popularity: 0,
            completion_rate: 0.0,
            fuzzy_distance: None,
        }
    }

    pub fn with_recency(mut self, recency_ts: DateTime<Utc>) -> Self {
        self.recency_ts = Some(recency_ts);
        self
    }

    pub fn with_popularity(mut self, popularity: u64) -> Self {
        self.popularity = popularity;
        self
    }

    pub fn with_completion_rate(mut self, completion_rate: f64) -> Self {
        self.completion_rate = completion_rate;
        self
    }

    pub fn with_fuzzy_distance(mut self, distance: usize) -> Self {
        self.fuzzy_distance = Some(distance);
        self
    }
}

impl From<EngineHit> for RawHit {
    fn from(hit: EngineHit) -> Self {
        RawHit {
            document_id: hit.document_id,
            base_text_score: hit.score,
            recency_ts: hit.stored_fields.recency_ts,
            popularity: hit.stored_fields.popularity,
            completion_rate: hit.stored_fields.completion_rate,
            fuzzy_distance: None,
        }
    }
}

/// A ranked hit. `final_score` is recomputed on every ranking pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredHit {
    pub document_id: String,
    pub base_text_score: f64,
    pub recency_ts: Option<DateTime<Utc>>,
    pub popularity: u64,
    pub completion_rate: f64,
    pub fuzzy_distance: Option<usize>,
    pub final_score: f64,
}

/// Scores hits with [`RankingWeights`] and sorts them by final score,
/// then document id.
#[derive(Debug, Clone, Default)]
pub struct RelevanceRanker {
    weights: RankingWeights,
}

impl RelevanceRanker {
    pub fn new(weights: RankingWeights) -> Result<Self> {
        weights.validate()?;
        Ok(RelevanceRanker { weights })
    }

    pub fn weights(&self) -> &RankingWeights {
        &self.weights
    }

    /// Rank hits against the current time.
    pub fn rank(&self, hits: Vec<RawHit>) -> Vec<ScoredHit> {
        self.rank_at(hits, Utc::now())
    }

    /// Rank hits with recency measured from `now`.
    pub fn rank_at(&self, hits: Vec<RawHit>, now: DateTime<Utc>) -> Vec<ScoredHit> {
        let mut scored: Vec<ScoredHit> = hits
            .into_iter()
            .map(|hit| {
                let final_score = self.score(&hit, now);
                ScoredHit {
                    document_id: hit.document_id,
                    base_text_score: hit.base_text_score,
                    recency_ts: hit.recency_ts,
                    popularity: hit.popularity,
                    completion_rate: hit.completion_rate,
                    fuzzy_distance: hit.fuzzy_distance,
                    final_score,
                }
            })
            .collect();

        scored.sort_by(compare_hits);
        scored
    }

    /// Composite score of one hit.
    pub fn score(&self, hit: &RawHit, now: DateTime<Utc>) -> f64 {
        let w = &self.weights;
        // Keep non-finite scores ordered: +inf above every finite score,
        // NaN and -inf below.
        let base = if hit.base_text_score.is_nan() {
            f64::MIN
        } else {
            hit.base_text_score.clamp(f64::MIN, f64::MAX)
        };

        base + w.recency * recency_decay(hit.recency_ts, now, w.recency_half_life_days)
            + w.popularity * popularity_signal(hit.popularity, w.popularity_saturation)
            + w.completion * completion_signal(hit.completion_rate)
            + w.fuzzy * fuzzy_proximity(hit.fuzzy_distance)
    }
}

/// Descending final score, ties by ascending document id.
fn compare_hits(a: &ScoredHit, b: &ScoredHit) -> Ordering {
    b.final_score
        .total_cmp(&a.final_score)
        .then_with(|| a.document_id.cmp(&b.document_id))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn ids(hits: &[ScoredHit]) -> Vec<&str> {
        hits.iter().map(|h| h.document_id.as_str()).collect()
    }

    #[test]
    fn test_text_relevance_beats_popularity() {
        let ranker = RelevanceRanker::default();
        let hits = vec![
            RawHit::new("popular", 9.0)
                .with_recency(now())
                .with_popularity(10_000_000)
                .with_completion_rate(1.0)
                .with_fuzzy_distance(0),
            RawHit::new("relevant", 9.5)
                .with_recency(now() - Duration::days(3650))
                .with_fuzzy_distance(5),
        ];

        let ranked = ranker.rank_at(hits, now());
        assert_eq!(ids(&ranked), vec!["relevant", "popular"]);
    }

    #[test]
    fn test_contextual_signals_break_near_ties() {
        let ranker = RelevanceRanker::default();
        let hits = vec![
            RawHit::new("old", 5.0).with_recency(now() - Duration::days(365)),
            RawHit::new("fresh", 5.0).with_recency(now()),
        ];
        assert_eq!(ids(&ranker.rank_at(hits, now())), vec!["fresh", "old"]);
    }

    #[test]
    fn test_ties_break_by_document_id() {
        let ranker = RelevanceRanker::default();
        let hits = vec![
            RawHit::new("doc-c", 1.0),
            RawHit::new("doc-a", 1.0),
            RawHit::new("doc-b", 1.0),
        ];
        for _ in 0..3 {
            assert_eq!(
                ids(&ranker.rank_at(hits.clone(), now())),
                vec!["doc-a", "doc-b", "doc-c"]
            );
        }
    }

    #[test]
    fn test_non_finite_base_score() {
        let ranker = RelevanceRanker::new(RankingWeights {
            fuzzy: 0.0,
            ..Default::default()
        })
        .unwrap();
        let ranked = ranker.rank_at(
            vec![
                RawHit::new("nan", f64::NAN),
                RawHit::new("neg-inf", f64::NEG_INFINITY),
                RawHit::new("one", 1.0).with_popularity(u64::MAX),
                RawHit::new("max", f64::MAX),
                RawHit::new("inf", f64::INFINITY),
                RawHit::new("min", -1.0e300),
            ],
            now(),
        );
        assert_eq!(ids(&ranked), vec!["inf", "max", "one", "min", "nan", "neg-inf"]);
        assert!(ranked.iter().all(|h| h.final_score.is_finite()));
        assert_eq!(ranked[0].final_score, f64::MAX);
        assert_eq!(ranked[5].final_score, f64::MIN);
    }

    #[test]
    fn test_score_upper_bound() {
        let ranker = RelevanceRanker::default();
        let hit = RawHit::new("max", 2.0)
            .with_recency(now())
            .with_popularity(u64::MAX)
            .with_completion_rate(3.0)
            .with_fuzzy_distance(0);
        let delta = ranker.score(&hit, now()) - 2.0;
        assert!((delta - ranker.weights().max_contextual_delta()).abs() < 1e-12);
    }

    #[test]
    fn test_from_engine_hit() {
        let hit: EngineHit = serde_json::from_str(
            r#"{"document_id": "d", "score": 3.0,
                "stored_fields": {"popularity": 7, "completion_rate": 0.5}}"#,
        )
        .unwrap();
        let raw = RawHit::from(hit);
        assert_eq!(raw.popularity, 7);
        assert_eq!(raw.base_text_score, 3.0);
        assert!(raw.fuzzy_distance.is_none());
    }
}
