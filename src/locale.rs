//! Locale profiles and the registry that resolves locale codes to them.
//!
//! A [`LocaleProfile`] fixes how text in one language is analyzed: which
//! tokenizer segments it, how case is folded, whether diacritics are
//! meaningful, which stop words are dropped, and whether the engine should
//! stem. Profiles are created once at startup and never mutated.
//!
//! # Examples
//!
//! ```
//! use polyglot_search::locale::{LocaleRegistry, ScriptDirection};
//!
//! let registry = LocaleRegistry::builtin().unwrap();
//! let arabic = registry.resolve("ar").unwrap();
//! assert_eq!(arabic.script_direction(), ScriptDirection::Rtl);
//! assert!(registry.resolve("xx").is_err());
//! ```

pub mod builtin;
pub mod profile;
pub mod registry;

pub use profile::{LocaleDefinition, LocaleProfile, ScriptDirection, TokenizerKind};
pub use registry::LocaleRegistry;
