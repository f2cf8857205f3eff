//! Tokenizer implementations for text analysis.
//!
//! Tokenizers split normalized text into tokens. Which tokenizer a locale
//! uses is part of its profile:
//!
//! - [`unicode_word::UnicodeWordTokenizer`] - Unicode word boundaries (UAX #29)
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace, trims punctuation
//! - [`cjk_bigram::CjkBigramTokenizer`] - Overlapping bigrams for Han/Kana runs
//!
//! # Examples
//!
//! ```
//! use polyglot_search::analysis::tokenizer::Tokenizer;
//! use polyglot_search::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
//!
//! let tokenizer = UnicodeWordTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world!").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so profiles can be shared across request
/// tasks.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod cjk_bigram;
pub mod unicode_word;
pub mod whitespace;

pub use cjk_bigram::CjkBigramTokenizer;
pub use unicode_word::UnicodeWordTokenizer;
pub use whitespace::WhitespaceTokenizer;
