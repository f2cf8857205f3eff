//! Ranking weights configuration.

use serde::{Deserialize, Serialize};

use crate::error::{PolyglotError, Result};

/// Weights and shape parameters of the contextual signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    pub recency: f64,
    pub popularity: f64,
    pub completion: f64,
    pub fuzzy: f64,
    /// Age at which the recency signal has halved.
    pub recency_half_life_days: f64,
    /// Popularity at which the popularity signal reaches 1.
    pub popularity_saturation: u64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        RankingWeights {
            recency: 0.15,
            popularity: 0.15,
            completion: 0.10,
            fuzzy: 0.05,
            recency_half_life_days: 30.0,
            popularity_saturation: 100_000,
        }
    }
}

impl RankingWeights {
    /// Largest amount contextual signals can add to a base score.
    pub fn max_contextual_delta(&self) -> f64 {
        self.recency + self.popularity + self.completion + self.fuzzy
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("recency", self.recency),
            ("popularity", self.popularity),
            ("completion", self.completion),
            ("fuzzy", self.fuzzy),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PolyglotError::config(format!(
                    "ranking weight '{name}' must be finite and non-negative, got {value}"
                )));
            }
        }
        if !self.recency_half_life_days.is_finite() || self.recency_half_life_days <= 0.0 {
            return Err(PolyglotError::config(format!(
                "recency_half_life_days must be positive, got {}",
                self.recency_half_life_days
            )));
        }
        if self.popularity_saturation == 0 {
            return Err(PolyglotError::config(
                "popularity_saturation must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let weights = RankingWeights::default();
        assert!(weights.validate().is_ok());
        assert!((weights.max_contextual_delta() - 0.45).abs() < 1e-12);
        assert!(weights.recency <= 0.3 && weights.popularity <= 0.3);
    }

    #[test]
    fn test_validation() {
        let bad = [
            RankingWeights {
                recency: -0.1,
                ..Default::default()
            },
            RankingWeights {
                fuzzy: f64::INFINITY,
                ..Default::default()
            },
            RankingWeights {
                recency_half_life_days: 0.0,
                ..Default::default()
            },
            RankingWeights {
                popularity_saturation: 0,
                ..Default::default()
            },
        ];
        for weights in bad {
            assert!(weights.validate().is_err(), "{weights:?}");
        }
    }

    #[test]
    fn test_partial_json() {
        let weights: RankingWeights = serde_json::from_str(r#"{"popularity": 0.3}"#).unwrap();
        assert_eq!(weights.popularity, 0.3);
        assert_eq!(weights.recency, 0.15);
    }
}
