//! Token types flowing through the analysis pipeline.
//!
//! # Examples
//!
//! ```
//! use polyglot_search::analysis::token::{Token, TokenType};
//!
//! let token = Token::with_offsets("world", 1, 6, 11).with_token_type(TokenType::Alphanum);
//! assert_eq!(token.text, "world");
//! assert_eq!(token.start_offset, 6);
//! assert_eq!(token.token_type, Some(TokenType::Alphanum));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text after tokenization.
///
/// # Fields
///
/// - `text` - The token's text content
/// - `position` - Position in the token stream (0-based)
/// - `start_offset` / `end_offset` - Byte offsets in the analyzed text
/// - `stopped` - Whether a filter marked the token for removal
/// - `token_type` - Script classification assigned by the tokenizer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts
    pub start_offset: usize,

    /// The byte offset where this token ends
    pub end_offset: usize,

    /// Whether this token has been marked as stopped by a filter
    pub stopped: bool,

    /// Script classification, when the tokenizer assigned one
    pub token_type: Option<TokenType>,
}

/// Token type classification for different kinds of tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// Alphanumeric text in Latin script
    Alphanum,
    /// Numeric values
    Num,
    /// Han ideographs
    Cjk,
    /// Katakana characters (Japanese)
    Katakana,
    /// Hiragana characters (Japanese)
    Hiragana,
    /// Hangul characters (Korean)
    Hangul,
    /// Character bigram produced for scripts without word boundaries
    Bigram,
    /// Other/unknown token types (Arabic, Cyrillic, Devanagari, mixed)
    Other,
}

impl TokenType {
    /// Classify a word by its characters.
    pub fn detect(word: &str) -> TokenType {
        if word.is_empty() {
            return TokenType::Other;
        }
        if word.chars().all(|c| c.is_numeric()) {
            return TokenType::Num;
        }
        if word.chars().all(|c| matches!(c, '\u{3040}'..='\u{309F}')) {
            return TokenType::Hiragana;
        }
        if word.chars().all(|c| matches!(c, '\u{30A0}'..='\u{30FF}')) {
            return TokenType::Katakana;
        }
        if word
            .chars()
            .any(|c| matches!(c, '\u{AC00}'..='\u{D7AF}' | '\u{1100}'..='\u{11FF}'))
        {
            return TokenType::Hangul;
        }
        if word.chars().any(is_han) {
            return TokenType::Cjk;
        }
        if word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return TokenType::Alphanum;
        }
        TokenType::Other
    }
}

/// Han ideographs, including the common extension blocks.
pub fn is_han(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}' |   // CJK Unified Ideographs
        '\u{3400}'..='\u{4DBF}' |   // CJK Extension A
        '\u{F900}'..='\u{FAFF}' |   // CJK Compatibility Ideographs
        '\u{20000}'..='\u{2A6DF}' | // CJK Extension B
        '\u{2A700}'..='\u{2CEAF}'   // CJK Extension C-E
    )
}

/// Characters from scripts written without spaces between words.
pub fn is_unsegmented_script(c: char) -> bool {
    is_han(c)
        || matches!(c,
            '\u{3040}'..='\u{309F}' | // Hiragana
            '\u{30A0}'..='\u{30FF}' | // Katakana
            '\u{31F0}'..='\u{31FF}'   // Katakana phonetic extensions
        )
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
            stopped: false,
            token_type: None,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            stopped: false,
            token_type: None,
        }
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Mark this token as stopped.
    pub fn stop(mut self) -> Self {
        self.stopped = true;
        self
    }

    /// Check if this token is stopped.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = Some(token_type);
        self
    }

    /// Replace the text, keeping positions and flags.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("hello", 0);
        assert_eq!(token.text, "hello");
        assert_eq!(token.position, 0);
        assert!(!token.stopped);
        assert!(token.token_type.is_none());
    }

    #[test]
    fn test_token_stop_and_text() {
        let token = Token::new("The", 3).with_text("the").stop();
        assert_eq!(token.text, "the");
        assert_eq!(token.position, 3);
        assert!(token.is_stopped());
    }

    #[test]
    fn test_detect_token_type() {
        assert_eq!(TokenType::detect("2024"), TokenType::Num);
        assert_eq!(TokenType::detect("algebra"), TokenType::Alphanum);
        assert_eq!(TokenType::detect("ひらがな"), TokenType::Hiragana);
        assert_eq!(TokenType::detect("カタカナ"), TokenType::Katakana);
        assert_eq!(TokenType::detect("한국어"), TokenType::Hangul);
        assert_eq!(TokenType::detect("神经"), TokenType::Cjk);
        assert_eq!(TokenType::detect("الجبر"), TokenType::Other);
    }

    #[test]
    fn test_unsegmented_script() {
        assert!(is_unsegmented_script('神'));
        assert!(is_unsegmented_script('の'));
        assert!(is_unsegmented_script('カ'));
        assert!(!is_unsegmented_script('한'));
        assert!(!is_unsegmented_script('a'));
    }

    #[test]
    fn test_token_display() {
        let token = Token::new("hello", 0);
        assert_eq!(format!("{token}"), "hello");
    }
}
