//! Token filter implementations for token transformation.
//!
//! - [`lowercase::LowercaseFilter`] - Locale-aware case folding
//! - [`diacritic::DiacriticFoldingFilter`] - Strips combining marks
//! - [`stop::StopFilter`] - Removes or marks stop words
//!
//! # Examples
//!
//! ```
//! use polyglot_search::analysis::token::Token;
//! use polyglot_search::analysis::token_filter::Filter;
//! use polyglot_search::analysis::token_filter::lowercase::LowercaseFilter;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello", 0), Token::new("WORLD", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod diacritic;
pub mod lowercase;
pub mod stop;

pub use diacritic::DiacriticFoldingFilter;
pub use lowercase::{CaseFolding, LowercaseFilter};
pub use stop::StopFilter;
