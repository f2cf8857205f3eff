//! Text analysis primitives shared by query normalization, synonym loading and
//! the in-memory engine.
//!
//! The pipeline mirrors the classic analyzer layout:
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Token Filters → Tokens
//! ```
//!
//! Every locale profile owns one [`analyzer::PipelineAnalyzer`] assembled from
//! these pieces, so a term is normalized the same way whether it comes from a
//! user query, a synonym file or an indexed document.

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
