//! Composite relevance scoring.
//!
//! ```text
//! final_score = base_text_score
//!             + w_recency    * recency_decay(recency_ts)
//!             + w_popularity * popularity_signal(popularity)
//!             + w_completion * completion_rate
//!             + w_fuzzy      * fuzzy_proximity(fuzzy_distance)
//! ```
//!
//! Every signal lies in `[0, 1]`, so contextual signals can move a hit by at
//! most [`RankingWeights::max_contextual_delta`]. A hit whose text score
//! leads by more than that always ranks first.

pub mod ranker;
pub mod signals;
pub mod weights;

pub use ranker::{RawHit, RelevanceRanker, ScoredHit};
pub use weights::RankingWeights;
