//! Contextual signals, each bounded to `[0, 1]`.

use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Exponential half-life decay of a document's age.
///
/// Missing timestamps score 0; timestamps in the future count as brand new.
pub fn recency_decay(
    recency_ts: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    half_life_days: f64,
) -> f64 {
    let Some(ts) = recency_ts else {
        return 0.0;
    };
    let age_days = ((now - ts).num_seconds().max(0) as f64) / SECONDS_PER_DAY;
    0.5_f64.powf(age_days / half_life_days).clamp(0.0, 1.0)
}

/// `log1p(popularity)` scaled so that `saturation` maps to 1.
pub fn popularity_signal(popularity: u64, saturation: u64) -> f64 {
    let saturation = saturation.max(1) as f64;
    ((popularity as f64).ln_1p() / saturation.ln_1p()).min(1.0)
}

/// Completion rate clamped to `[0, 1]`; NaN counts as 0.
pub fn completion_signal(completion_rate: f64) -> f64 {
    if completion_rate.is_nan() {
        return 0.0;
    }
    completion_rate.clamp(0.0, 1.0)
}

/// `1 / (1 + distance)`; an unknown distance counts as an exact match.
pub fn fuzzy_proximity(distance: Option<usize>) -> f64 {
    1.0 / (1.0 + distance.unwrap_or(0) as f64)
}
