//! Locale profile definition and the analysis chain it owns.

use std::fmt;
use std::sync::Arc;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::char_filter::{NormalizationForm, UnicodeNormalizationCharFilter};
use crate::analysis::token::Token;
use crate::analysis::token_filter::{
    CaseFolding, DiacriticFoldingFilter, Filter, LowercaseFilter, StopFilter,
};
use crate::analysis::tokenizer::{
    CjkBigramTokenizer, Tokenizer, UnicodeWordTokenizer, WhitespaceTokenizer,
};
use crate::error::{PolyglotError, Result};

/// Writing direction of a locale's script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Segmentation strategy for a locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    /// Unicode word boundaries, for space-delimited scripts.
    #[default]
    UnicodeWord,
    /// Whitespace splitting with punctuation trimming.
    Whitespace,
    /// Overlapping bigrams over Han/Kana runs.
    CjkBigram,
}

impl TokenizerKind {
    fn build(self) -> Arc<dyn Tokenizer> {
        match self {
            TokenizerKind::UnicodeWord => Arc::new(UnicodeWordTokenizer::new()),
            TokenizerKind::Whitespace => Arc::new(WhitespaceTokenizer::new()),
            TokenizerKind::CjkBigram => Arc::new(CjkBigramTokenizer::new()),
        }
    }
}

/// Serializable description of a locale, as found in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleDefinition {
    /// Locale code such as `en`, `ar` or `zh-Hans`.
    pub code: String,
    #[serde(default)]
    pub script_direction: ScriptDirection,
    #[serde(default)]
    pub tokenizer: TokenizerKind,
    #[serde(default)]
    pub stopwords: Vec<String>,
    /// Forwarded to the engine's analyzer; query terms are never stemmed here.
    #[serde(default)]
    pub stemming_enabled: bool,
    /// Whether diacritics are non-distinguishing and may be folded away.
    #[serde(default)]
    pub strip_diacritics: bool,
    #[serde(default)]
    pub case_folding: CaseFolding,
}

impl LocaleDefinition {
    /// Create a definition with default analysis settings.
    pub fn new<S: Into<String>>(code: S) -> Self {
        LocaleDefinition {
            code: code.into(),
            script_direction: ScriptDirection::Ltr,
            tokenizer: TokenizerKind::UnicodeWord,
            stopwords: Vec::new(),
            stemming_enabled: false,
            strip_diacritics: false,
            case_folding: CaseFolding::Standard,
        }
    }

    pub fn with_direction(mut self, direction: ScriptDirection) -> Self {
        self.script_direction = direction;
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: TokenizerKind) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords = words.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_stemming(mut self, enabled: bool) -> Self {
        self.stemming_enabled = enabled;
        self
    }

    pub fn with_strip_diacritics(mut self, strip: bool) -> Self {
        self.strip_diacritics = strip;
        self
    }

    pub fn with_case_folding(mut self, folding: CaseFolding) -> Self {
        self.case_folding = folding;
        self
    }
}

/// Immutable analysis profile of one locale.
///
/// Stop words are stored in analyzed form, so they compare equal to the
/// tokens the profile's own analyzer produces.
#[derive(Clone)]
pub struct LocaleProfile {
    code: String,
    script_direction: ScriptDirection,
    tokenizer: TokenizerKind,
    stopwords: Arc<AHashSet<String>>,
    stemming_enabled: bool,
    strip_diacritics: bool,
    case_folding: CaseFolding,
    analyzer: PipelineAnalyzer,
}

impl LocaleProfile {
    /// Build a profile from its definition.
    ///
    /// Fails when the code is empty or contains characters other than ASCII
    /// letters, digits, `-` and `_`.
    pub fn from_definition(definition: LocaleDefinition) -> Result<Self> {
        let code = definition.code.trim().to_string();
        if code.is_empty() {
            return Err(PolyglotError::config("locale code must not be empty"));
        }
        if !code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(PolyglotError::config(format!(
                "locale code '{code}' contains invalid characters"
            )));
        }

        let mut analyzer = PipelineAnalyzer::new(definition.tokenizer.build())
            .add_char_filter(Arc::new(UnicodeNormalizationCharFilter::new(
                NormalizationForm::NFKC,
            )));
        if definition.case_folding != CaseFolding::None {
            analyzer = analyzer.add_filter(Arc::new(LowercaseFilter::with_folding(
                definition.case_folding,
            )));
        }
        if definition.strip_diacritics {
            analyzer = analyzer.add_filter(Arc::new(DiacriticFoldingFilter::new()));
        }
        let analyzer = analyzer.with_name(code.clone());

        let mut stopwords = AHashSet::with_capacity(definition.stopwords.len());
        for word in &definition.stopwords {
            let mut tokens = analyzer.analyze(word)?;
            match (tokens.next(), tokens.next()) {
                (Some(token), None) => {
                    stopwords.insert(token.text);
                }
                (None, _) => {}
                (Some(_), Some(_)) => {
                    log::debug!(
                        "locale {code}: stop word '{word}' analyzes to several tokens, skipped"
                    );
                }
            }
        }

        Ok(LocaleProfile {
            code,
            script_direction: definition.script_direction,
            tokenizer: definition.tokenizer,
            stopwords: Arc::new(stopwords),
            stemming_enabled: definition.stemming_enabled,
            strip_diacritics: definition.strip_diacritics,
            case_folding: definition.case_folding,
            analyzer,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn script_direction(&self) -> ScriptDirection {
        self.script_direction
    }

    pub fn tokenizer(&self) -> TokenizerKind {
        self.tokenizer
    }

    pub fn stemming_enabled(&self) -> bool {
        self.stemming_enabled
    }

    pub fn strip_diacritics(&self) -> bool {
        self.strip_diacritics
    }

    pub fn case_folding(&self) -> CaseFolding {
        self.case_folding
    }

    pub fn stopwords(&self) -> &AHashSet<String> {
        &self.stopwords
    }

    /// Whether an analyzed token is a stop word in this locale.
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// A stop filter that marks, rather than removes, stop words.
    pub fn stop_filter(&self) -> StopFilter {
        StopFilter::with_stop_words(Arc::clone(&self.stopwords)).remove_stopped(false)
    }

    /// Run the profile's analysis chain: NFKC, segmentation, case folding
    /// and diacritic folding. Stop words are kept.
    pub fn analyze(&self, text: &str) -> Result<Vec<Token>> {
        Ok(self.analyzer.analyze(text)?.collect())
    }

    /// Analyze a term or phrase and join the resulting tokens with single
    /// spaces. Used as the lookup key for synonyms.
    pub fn normalize_term(&self, term: &str) -> Result<String> {
        let tokens = self.analyze(term)?;
        Ok(tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// Analyze text and mark, without removing, its stop words.
    pub fn mark_stopwords(&self, text: &str) -> Result<Vec<Token>> {
        let tokens = self.analyze(text)?;
        Ok(self
            .stop_filter()
            .filter(Box::new(tokens.into_iter()))?
            .collect())
    }

    /// Like [`normalize_term`](Self::normalize_term), but stop words are
    /// dropped whenever another token remains, exactly as query text is
    /// reduced before synonym lookup.
    pub fn normalize_key(&self, term: &str) -> Result<String> {
        let marked = self.mark_stopwords(term)?;
        let keep_all = marked.iter().all(Token::is_stopped);
        Ok(marked
            .iter()
            .filter(|t| keep_all || !t.is_stopped())
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// The definition this profile was built from, with analyzed stop words.
    pub fn definition(&self) -> LocaleDefinition {
        let mut stopwords: Vec<String> = self.stopwords.iter().cloned().collect();
        stopwords.sort();
        LocaleDefinition {
            code: self.code.clone(),
            script_direction: self.script_direction,
            tokenizer: self.tokenizer,
            stopwords,
            stemming_enabled: self.stemming_enabled,
            strip_diacritics: self.strip_diacritics,
            case_folding: self.case_folding,
        }
    }
}

impl fmt::Debug for LocaleProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleProfile")
            .field("code", &self.code)
            .field("script_direction", &self.script_direction)
            .field("tokenizer", &self.tokenizer)
            .field("stopwords", &self.stopwords.len())
            .field("stemming_enabled", &self.stemming_enabled)
            .field("strip_diacritics", &self.strip_diacritics)
            .field("case_folding", &self.case_folding)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_analysis_chain() {
        let profile = LocaleProfile::from_definition(
            LocaleDefinition::new("fr")
                .with_strip_diacritics(true)
                .with_stopwords(["Le", "la", "Où"]),
        )
        .unwrap();

        let tokens: Vec<String> = profile
            .analyze("Équations du Second degré")
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(tokens, vec!["equations", "du", "second", "degre"]);

        // Stop words are stored in analyzed form.
        assert!(profile.is_stopword("le"));
        assert!(profile.is_stopword("ou"));
        assert!(!profile.is_stopword("Le"));
    }

    #[test]
    fn test_normalize_key_drops_inner_stopwords() {
        let profile = LocaleProfile::from_definition(
            LocaleDefinition::new("en").with_stopwords(["of", "the"]),
        )
        .unwrap();
        assert_eq!(
            profile.normalize_key("Theory of Computation").unwrap(),
            "theory computation"
        );
        assert_eq!(profile.normalize_term("Theory of Computation").unwrap(), "theory of computation");
        // Nothing but stop words: the phrase is kept as written.
        assert_eq!(profile.normalize_key("of the").unwrap(), "of the");
    }

    #[test]
    fn test_diacritics_kept_when_distinguishing() {
        let profile = LocaleProfile::from_definition(LocaleDefinition::new("es")).unwrap();
        assert_eq!(profile.normalize_term("Año").unwrap(), "año");
    }

    #[test]
    fn test_normalize_term_phrase() {
        let profile = LocaleProfile::from_definition(LocaleDefinition::new("en")).unwrap();
        assert_eq!(
            profile.normalize_term("  Algebraic   MATH ").unwrap(),
            "algebraic math"
        );
        assert_eq!(profile.normalize_term("!!").unwrap(), "");
    }

    #[test]
    fn test_invalid_codes_rejected() {
        assert!(LocaleProfile::from_definition(LocaleDefinition::new("  ")).is_err());
        assert!(LocaleProfile::from_definition(LocaleDefinition::new("en us")).is_err());
        assert!(LocaleProfile::from_definition(LocaleDefinition::new("zh-Hans")).is_ok());
    }

    #[test]
    fn test_definition_round_trip_through_json() {
        let json = r#"{"code": "tr", "case_folding": "turkic", "stemming_enabled": true}"#;
        let definition: LocaleDefinition = serde_json::from_str(json).unwrap();
        let profile = LocaleProfile::from_definition(definition).unwrap();

        assert_eq!(profile.case_folding(), CaseFolding::Turkic);
        assert_eq!(profile.tokenizer(), TokenizerKind::UnicodeWord);
        assert_eq!(profile.normalize_term("IŞIK").unwrap(), "ışık");
    }
}
