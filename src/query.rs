//! Query normalization and synonym expansion.
//!
//! Raw text goes through [`QueryNormalizer`] to become a
//! [`NormalizedQuery`]; [`QueryExpander`] then turns it into an
//! [`ExpandedQuery`], which renders to the structured
//! [`EngineQuery`](crate::engine::EngineQuery).
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use polyglot_search::locale::LocaleRegistry;
//! use polyglot_search::query::{QueryExpander, QueryNormalizer};
//! use polyglot_search::synonym::{SynonymEntry, SynonymStore};
//!
//! let registry = Arc::new(LocaleRegistry::builtin().unwrap());
//! let store = Arc::new(SynonymStore::new(Arc::clone(&registry)));
//! store
//!     .reload_entries("en", vec![SynonymEntry::new("algebra", vec!["algebraic math"]).unwrap()])
//!     .unwrap();
//!
//! let normalizer = QueryNormalizer::new(Arc::clone(&registry));
//! let expander = QueryExpander::new(store);
//!
//! let normalized = normalizer.normalize("Algebra equations", "en").unwrap();
//! let expanded = expander.expand(&normalized).unwrap();
//!
//! assert_eq!(expanded.expansion_groups.len(), 2);
//! assert_eq!(
//!     expanded.expansion_groups[0].weights(),
//!     vec![("algebra", 1.0), ("algebraic math", 0.7)]
//! );
//! ```

pub mod expander;
pub mod normalizer;
pub mod types;

pub use expander::{ExpansionConfig, QueryExpander};
pub use normalizer::{NormalizerConfig, QueryNormalizer};
pub use types::{ExpandedQuery, ExpansionGroup, NormalizedQuery, WeightedTerm};
