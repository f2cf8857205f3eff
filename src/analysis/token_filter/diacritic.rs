//! Diacritic folding filter.
//!
//! Decomposes each token (NFD), drops combining marks and recomposes (NFC),
//! so `é` matches `e` and Arabic short-vowel marks (harakat) are ignored.
//! Only locales whose profile marks diacritics as non-distinguishing enable
//! it: in Spanish `año` and `ano` are different words, and Devanagari vowel
//! signs are combining marks that carry meaning.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Arabic tatweel, a purely typographic elongation character.
const ARABIC_TATWEEL: char = '\u{0640}';

/// A filter that removes diacritics from tokens.
///
/// Tokens that consist only of marks disappear entirely rather than
/// surviving as empty strings.
#[derive(Clone, Debug, Default)]
pub struct DiacriticFoldingFilter;

impl DiacriticFoldingFilter {
    /// Create a new diacritic folding filter.
    pub fn new() -> Self {
        DiacriticFoldingFilter
    }

    /// Fold a single term.
    pub fn fold(text: &str) -> String {
        if text.is_ascii() {
            return text.to_string();
        }
        text.nfd()
            .filter(|&c| !is_combining_mark(c) && c != ARABIC_TATWEEL)
            .nfc()
            .collect()
    }
}

impl Filter for DiacriticFoldingFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .filter_map(|token| {
                if token.is_stopped() {
                    return Some(token);
                }
                let folded = Self::fold(&token.text);
                if folded.is_empty() {
                    None
                } else {
                    Some(token.with_text(folded))
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "diacritic_folding"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_latin_diacritics() {
        assert_eq!(DiacriticFoldingFilter::fold("équation"), "equation");
        assert_eq!(DiacriticFoldingFilter::fold("matemática"), "matematica");
        assert_eq!(DiacriticFoldingFilter::fold("plain"), "plain");
    }

    #[test]
    fn test_arabic_harakat_and_tatweel() {
        // "al-jabr" written with fatha/sukun marks and a tatweel
        assert_eq!(DiacriticFoldingFilter::fold("الْجَبْـر"), "الجبر");
    }

    #[test]
    fn test_mark_only_tokens_are_dropped() {
        let filter = DiacriticFoldingFilter::new();
        let tokens = vec![Token::new("\u{0301}", 0), Token::new("café", 1)];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].text, "cafe");
        assert_eq!(result[0].position, 1);
    }
}
