//! Interface to the inverted-index engine that stores the documents.
//!
//! The orchestration layer only ever speaks the structured
//! [`EngineQuery`]/[`EngineResponse`] protocol, so analyzer selection and
//! term weighting stay explicit. [`InMemoryEngine`] is a small reference
//! backend used by tests and the command line tool.

use std::future::Future;
use std::sync::Arc;

use crate::error::Result;

pub mod memory;
pub mod types;

pub use memory::{Document, InMemoryEngine};
pub use types::{EngineHit, EngineQuery, EngineResponse, StoredFields, WeightedClause};

/// A search backend.
///
/// Implementations must not retry internally; the orchestrator bounds each
/// call with a timeout and drops the returned future when the caller goes
/// away.
pub trait SearchEngine: Send + Sync {
    /// Execute a structured query.
    fn execute(&self, query: EngineQuery) -> impl Future<Output = Result<EngineResponse>> + Send;

    /// Name of this engine, for logging.
    fn name(&self) -> &str;
}

impl<E: SearchEngine> SearchEngine for Arc<E> {
    fn execute(&self, query: EngineQuery) -> impl Future<Output = Result<EngineResponse>> + Send {
        (**self).execute(query)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
