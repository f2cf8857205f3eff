//! Per-locale synonym tables with atomic reload.
//!
//! A [`SynonymTable`] maps a canonical term (or multi-word phrase) to an
//! ordered list of variants for one locale. Keys and variants are stored in
//! the locale's analyzed form, so lookups take normalizer output directly.
//!
//! The [`SynonymStore`] holds one table per registered locale. Reloading a
//! locale builds the replacement table off to the side and publishes it with
//! a single reference swap; readers take a snapshot and keep using it for the
//! whole request, so they see either the old or the new table, never a mix.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use polyglot_search::locale::LocaleRegistry;
//! use polyglot_search::synonym::{SynonymEntry, SynonymStore};
//!
//! let registry = Arc::new(LocaleRegistry::builtin().unwrap());
//! let store = SynonymStore::new(Arc::clone(&registry));
//!
//! store
//!     .reload_entries("en", vec![SynonymEntry::new("Algebra", vec!["algebraic math"]).unwrap()])
//!     .unwrap();
//!
//! assert_eq!(store.expand("en", "ALGEBRA").unwrap(), vec!["algebraic math"]);
//! assert!(store.expand("en", "geometry").unwrap().is_empty());
//! ```

pub mod store;
pub mod table;

pub use store::SynonymStore;
pub use table::{SynonymEntry, SynonymTable};
