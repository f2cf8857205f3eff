//! Built-in profiles for the 14 supported content languages.
//!
//! Stop word lists are deliberately short: they only need to catch function
//! words that would otherwise dominate query terms.

use crate::analysis::token_filter::CaseFolding;
use crate::locale::profile::{LocaleDefinition, ScriptDirection, TokenizerKind};

/// Locale codes covered by [`definitions`], in catalogue order.
pub const SUPPORTED_LOCALES: &[&str] = &[
    "en", "es", "fr", "de", "it", "pt", "ru", "tr", "ar", "hi", "zh-Hans", "zh-Hant", "ja", "ko",
];

const EN_STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

const ES_STOPWORDS: &[&str] = &[
    "el", "la", "los", "las", "un", "una", "unos", "unas", "de", "del", "y", "o", "en", "a", "al",
    "que", "por", "para", "con", "se", "es",
];

const FR_STOPWORDS: &[&str] = &[
    "le", "la", "les", "un", "une", "des", "de", "du", "et", "ou", "en", "à", "au", "aux", "que",
    "qui", "pour", "par", "sur", "avec", "est",
];

const DE_STOPWORDS: &[&str] = &[
    "der", "die", "das", "den", "dem", "des", "ein", "eine", "einer", "und", "oder", "in", "im",
    "zu", "mit", "von", "für", "ist", "auf",
];

const IT_STOPWORDS: &[&str] = &[
    "il", "lo", "la", "i", "gli", "le", "un", "una", "di", "del", "della", "e", "o", "in", "a",
    "per", "con", "che", "è",
];

const PT_STOPWORDS: &[&str] = &[
    "o", "a", "os", "as", "um", "uma", "de", "do", "da", "dos", "das", "e", "ou", "em", "no", "na",
    "para", "por", "com", "que",
];

const RU_STOPWORDS: &[&str] = &[
    "и", "в", "во", "на", "с", "со", "по", "к", "о", "об", "от", "для", "что", "это", "как", "не",
    "или",
];

const TR_STOPWORDS: &[&str] = &[
    "ve", "veya", "ile", "bir", "bu", "şu", "için", "de", "da", "mi", "ne", "gibi",
];

const AR_STOPWORDS: &[&str] = &[
    "في", "من", "على", "إلى", "عن", "و", "أو", "ثم", "هذا", "هذه", "ذلك", "التي", "الذي", "مع",
    "ما", "لا", "هو", "هي",
];

const HI_STOPWORDS: &[&str] = &[
    "का", "के", "की", "है", "हैं", "और", "या", "में", "से", "को", "पर", "यह", "वह",
];

const ZH_HANS_STOPWORDS: &[&str] = &["的", "了", "和", "是", "在", "与", "或"];

const ZH_HANT_STOPWORDS: &[&str] = &["的", "了", "和", "是", "在", "與", "或"];

const JA_STOPWORDS: &[&str] = &["の", "に", "は", "を", "が", "で", "と", "も"];

const KO_STOPWORDS: &[&str] = &["및", "또는", "그", "이", "저", "것"];

/// Definitions for every locale in [`SUPPORTED_LOCALES`].
pub fn definitions() -> Vec<LocaleDefinition> {
    vec![
        latin("en", EN_STOPWORDS, true),
        // "año" vs "ano"
        latin("es", ES_STOPWORDS, false),
        latin("fr", FR_STOPWORDS, true),
        // "schon" vs "schön"
        latin("de", DE_STOPWORDS, false),
        latin("it", IT_STOPWORDS, true),
        latin("pt", PT_STOPWORDS, true),
        LocaleDefinition::new("ru")
            .with_stopwords(RU_STOPWORDS.iter().copied())
            .with_stemming(true),
        LocaleDefinition::new("tr")
            .with_stopwords(TR_STOPWORDS.iter().copied())
            .with_stemming(true)
            .with_case_folding(CaseFolding::Turkic),
        LocaleDefinition::new("ar")
            .with_direction(ScriptDirection::Rtl)
            .with_stopwords(AR_STOPWORDS.iter().copied())
            .with_stemming(true)
            .with_strip_diacritics(true),
        // Devanagari vowel signs are combining marks.
        LocaleDefinition::new("hi").with_stopwords(HI_STOPWORDS.iter().copied()),
        cjk("zh-Hans", ZH_HANS_STOPWORDS),
        cjk("zh-Hant", ZH_HANT_STOPWORDS),
        cjk("ja", JA_STOPWORDS),
        LocaleDefinition::new("ko").with_stopwords(KO_STOPWORDS.iter().copied()),
    ]
}

fn latin(code: &str, stopwords: &[&str], strip_diacritics: bool) -> LocaleDefinition {
    LocaleDefinition::new(code)
        .with_stopwords(stopwords.iter().copied())
        .with_stemming(true)
        .with_strip_diacritics(strip_diacritics)
}

fn cjk(code: &str, stopwords: &[&str]) -> LocaleDefinition {
    LocaleDefinition::new(code)
        .with_tokenizer(TokenizerKind::CjkBigram)
        .with_stopwords(stopwords.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_matches_supported_list() {
        let codes: Vec<String> = definitions().into_iter().map(|d| d.code).collect();
        assert_eq!(codes, SUPPORTED_LOCALES);
    }

    #[test]
    fn test_rtl_and_tokenizers() {
        let defs = definitions();
        let rtl: Vec<&str> = defs
            .iter()
            .filter(|d| d.script_direction == ScriptDirection::Rtl)
            .map(|d| d.code.as_str())
            .collect();
        assert_eq!(rtl, vec!["ar"]);

        let bigram: Vec<&str> = defs
            .iter()
            .filter(|d| d.tokenizer == TokenizerKind::CjkBigram)
            .map(|d| d.code.as_str())
            .collect();
        assert_eq!(bigram, vec!["zh-Hans", "zh-Hant", "ja"]);
    }
}
