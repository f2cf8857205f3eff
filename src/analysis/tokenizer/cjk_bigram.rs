//! Bigram tokenizer for scripts written without word boundaries.
//!
//! Han ideographs and Kana have no spaces between words, and a dictionary
//! segmenter is not available for every locale, so runs of these characters
//! are indexed and queried as overlapping character bigrams. Text in other
//! scripts inside the same input (Latin product names, numbers) is split on
//! Unicode word boundaries as usual.
//!
//! # Examples
//!
//! ```
//! use polyglot_search::analysis::tokenizer::Tokenizer;
//! use polyglot_search::analysis::tokenizer::cjk_bigram::CjkBigramTokenizer;
//!
//! let tokenizer = CjkBigramTokenizer::new();
//! let tokens: Vec<_> = tokenizer
//!     .tokenize("神经网络")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//! assert_eq!(tokens, vec!["神经", "经网", "网络"]);
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream, TokenType, is_unsegmented_script};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer emitting overlapping bigrams for Han/Kana runs.
///
/// A run of a single character is emitted as a unigram so one-character
/// queries stay searchable.
#[derive(Clone, Debug, Default)]
pub struct CjkBigramTokenizer;

impl CjkBigramTokenizer {
    /// Create a new bigram tokenizer.
    pub fn new() -> Self {
        CjkBigramTokenizer
    }

    fn flush_run(run: &mut Vec<(usize, char)>, tokens: &mut Vec<Token>) {
        match run.len() {
            0 => {}
            1 => {
                let (offset, c) = run[0];
                tokens.push(
                    Token::with_offsets(c.to_string(), tokens.len(), offset, offset + c.len_utf8())
                        .with_token_type(TokenType::Cjk),
                );
            }
            _ => {
                for pair in run.windows(2) {
                    let (start, first) = pair[0];
                    let (second_start, second) = pair[1];
                    let text: String = [first, second].iter().collect();
                    tokens.push(
                        Token::with_offsets(
                            text,
                            tokens.len(),
                            start,
                            second_start + second.len_utf8(),
                        )
                        .with_token_type(TokenType::Bigram),
                    );
                }
            }
        }
        run.clear();
    }
}

impl Tokenizer for CjkBigramTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut run: Vec<(usize, char)> = Vec::new();

        for (offset, segment) in text.split_word_bound_indices() {
            if segment.chars().all(is_unsegmented_script) {
                run.extend(segment.char_indices().map(|(i, c)| (offset + i, c)));
                continue;
            }

            Self::flush_run(&mut run, &mut tokens);

            if segment.chars().any(|c| c.is_alphanumeric()) {
                tokens.push(
                    Token::with_offsets(segment, tokens.len(), offset, offset + segment.len())
                        .with_token_type(TokenType::detect(segment)),
                );
            }
        }
        Self::flush_run(&mut run, &mut tokens);

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "cjk_bigram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        CjkBigramTokenizer::new()
            .tokenize(input)
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_bigrams_for_han_run() {
        assert_eq!(texts("神经网络"), vec!["神经", "经网", "网络"]);
    }

    #[test]
    fn test_mixed_script_input() {
        assert_eq!(texts("深度学习 AI"), vec!["深度", "度学", "学习", "AI"]);
        assert_eq!(texts("neural 网络"), vec!["neural", "网络"]);
    }

    #[test]
    fn test_single_character_run_is_unigram() {
        assert_eq!(texts("学"), vec!["学"]);
        assert_eq!(texts("学, 习"), vec!["学", "习"]);
    }

    #[test]
    fn test_punctuation_breaks_runs() {
        assert_eq!(texts("代数。方程"), vec!["代数", "方程"]);
    }

    #[test]
    fn test_offsets_and_positions() {
        let tokens: Vec<Token> = CjkBigramTokenizer::new()
            .tokenize("AI网络")
            .unwrap()
            .collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].text, "网络");
        assert_eq!(tokens[1].position, 1);
        assert_eq!(tokens[1].start_offset, 2);
        assert_eq!(tokens[1].end_offset, 8);
    }
}
