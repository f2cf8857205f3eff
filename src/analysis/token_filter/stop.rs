//! Stop filter implementation.
//!
//! Removes, or marks as stopped, words that carry no search value on their
//! own ("the", "و", "的"). Stop word sets come from locale profiles.
//!
//! # Examples
//!
//! ```
//! use polyglot_search::analysis::token::Token;
//! use polyglot_search::analysis::token_filter::Filter;
//! use polyglot_search::analysis::token_filter::stop::StopFilter;
//!
//! let filter = StopFilter::from_words(vec!["the", "of"]);
//! let tokens = vec![Token::new("the", 0), Token::new("algebra", 1)];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//!
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].text, "algebra");
//! ```

use std::sync::Arc;

use ahash::AHashSet;

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that removes stop words from the token stream.
///
/// With `remove_stopped(false)` the tokens stay in the stream flagged as
/// stopped, which lets the caller decide what to do when nothing else is
/// left.
#[derive(Clone, Debug)]
pub struct StopFilter {
    stop_words: Arc<AHashSet<String>>,
    remove_stopped: bool,
}

impl StopFilter {
    /// Create a new stop filter sharing an existing stop word set.
    pub fn with_stop_words(stop_words: Arc<AHashSet<String>>) -> Self {
        StopFilter {
            stop_words,
            remove_stopped: true,
        }
    }

    /// Create a new stop filter from a list of stop words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stop_words = words.into_iter().map(|s| s.into()).collect();
        Self::with_stop_words(Arc::new(stop_words))
    }

    /// Set whether to remove stopped tokens entirely or just mark them as stopped.
    pub fn remove_stopped(mut self, remove: bool) -> Self {
        self.remove_stopped = remove;
        self
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Check if a token should be stopped.
    ///
    /// Character bigrams are also stopped when each of their characters is
    /// a stop word, since single-character stop words never appear alone
    /// inside a longer Han or Kana run.
    pub fn is_stop_token(&self, token: &Token) -> bool {
        if self.is_stop_word(&token.text) {
            return true;
        }
        token.token_type == Some(TokenType::Bigram)
            && token
                .text
                .chars()
                .all(|c| self.is_stop_word(c.encode_utf8(&mut [0; 4])))
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens
            .filter_map(|token| {
                if token.is_stopped() {
                    Some(token)
                } else if self.is_stop_token(&token) {
                    if self.remove_stopped {
                        None
                    } else {
                        Some(token.stop())
                    }
                } else {
                    Some(token)
                }
            })
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_filter() {
        let filter = StopFilter::from_words(vec!["the", "and", "or"]);
        let tokens = vec![
            Token::new("hello", 0),
            Token::new("the", 1),
            Token::new("world", 2),
            Token::new("and", 3),
            Token::new("test", 4),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "hello");
        assert_eq!(result[1].text, "world");
        assert_eq!(result[2].text, "test");
    }

    #[test]
    fn test_stop_filter_preserve_stopped() {
        let filter = StopFilter::from_words(vec!["في", "من"]).remove_stopped(false);
        let tokens = vec![Token::new("في", 0), Token::new("الجبر", 1)];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 2);
        assert!(result[0].is_stopped());
        assert!(!result[1].is_stopped());
    }

    #[test]
    fn test_bigram_of_stop_characters_is_stopped() {
        let filter = StopFilter::from_words(vec!["的", "了", "是"]).remove_stopped(false);
        let tokens = vec![
            Token::new("的了", 0).with_token_type(TokenType::Bigram),
            Token::new("的神", 1).with_token_type(TokenType::Bigram),
            // Only bigrams are split into characters.
            Token::new("的了", 2).with_token_type(TokenType::Other),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert!(result[0].is_stopped());
        assert!(!result[1].is_stopped());
        assert!(!result[2].is_stopped());
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(StopFilter::from_words(Vec::<String>::new()).name(), "stop");
    }
}
