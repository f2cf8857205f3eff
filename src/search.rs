//! Search entry point.
//!
//! [`SearchOrchestrator`] drives a request through normalization, synonym
//! expansion, the engine call and re-ranking, and returns one page of
//! ranked hits.

pub mod orchestrator;
pub mod request;
pub mod result;

pub use orchestrator::SearchOrchestrator;
pub use request::SearchRequest;
pub use result::SearchResult;
