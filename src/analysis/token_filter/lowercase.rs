//! Lowercase filter implementation.
//!
//! Case folding is locale dependent: Turkish and Azerbaijani distinguish
//! dotted and dotless `i`, so `I` must fold to `ı` and `İ` to `i` there,
//! while every other cased script uses the default Unicode mapping. Scripts
//! without case pass through unchanged.

use serde::{Deserialize, Serialize};

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Case folding rule applied by a locale profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseFolding {
    /// Keep case as written.
    None,
    /// Default Unicode lowercase mapping.
    #[default]
    Standard,
    /// Turkic dotted/dotless i rules, then the default mapping.
    Turkic,
}

impl CaseFolding {
    /// Fold a single term.
    pub fn fold(self, text: &str) -> String {
        match self {
            CaseFolding::None => text.to_string(),
            CaseFolding::Standard if text.is_ascii() => text.to_ascii_lowercase(),
            CaseFolding::Standard => text.to_lowercase(),
            CaseFolding::Turkic => text
                .chars()
                .map(|c| match c {
                    'I' => 'ı',
                    'İ' => 'i',
                    other => other,
                })
                .collect::<String>()
                .to_lowercase(),
        }
    }
}

/// A filter that converts tokens to lowercase.
///
/// Stopped tokens are left untouched; positions and offsets are preserved.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter {
    folding: CaseFolding,
}

impl LowercaseFilter {
    /// Create a new lowercase filter using the default Unicode mapping.
    pub fn new() -> Self {
        LowercaseFilter {
            folding: CaseFolding::Standard,
        }
    }

    /// Create a lowercase filter with an explicit folding rule.
    pub fn with_folding(folding: CaseFolding) -> Self {
        LowercaseFilter { folding }
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let folding = self.folding;
        let filtered_tokens = tokens
            .map(|token| {
                if token.is_stopped() {
                    token
                } else {
                    let folded = folding.fold(&token.text);
                    token.with_text(folded)
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_lowercase_filter() {
        let filter = LowercaseFilter::new();
        let tokens = vec![
            Token::new("Hello", 0),
            Token::new("ВЕКТОР", 1),
            Token::new("Test", 2).stop(),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "hello");
        assert_eq!(result[1].text, "вектор");
        assert_eq!(result[2].text, "Test"); // Stopped tokens are not processed
    }

    #[test]
    fn test_turkic_folding() {
        assert_eq!(CaseFolding::Turkic.fold("ISTANBUL"), "ıstanbul");
        assert_eq!(CaseFolding::Turkic.fold("İstanbul"), "istanbul");
        assert_eq!(CaseFolding::Standard.fold("İZMİR").chars().count(), 7);
    }

    #[test]
    fn test_caseless_scripts_unchanged() {
        assert_eq!(CaseFolding::Standard.fold("الجبر"), "الجبر");
        assert_eq!(CaseFolding::Standard.fold("网络"), "网络");
        assert_eq!(CaseFolding::None.fold("Algebra"), "Algebra");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LowercaseFilter::new().name(), "lowercase");
    }
}
