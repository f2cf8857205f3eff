//! Immutable synonym table for one locale.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{PolyglotError, Result};
use crate::locale::LocaleProfile;

/// A canonical term and its ordered variants, as authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub canonical_term: String,
    pub variants: Vec<String>,
}

impl SynonymEntry {
    /// Create an entry. The canonical term must not be blank; variants
    /// equal to the canonical term are dropped.
    pub fn new<S, I, V>(canonical_term: S, variants: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let canonical_term = canonical_term.into();
        if canonical_term.trim().is_empty() {
            return Err(PolyglotError::config("synonym canonical term must not be empty"));
        }

        let variants = variants
            .into_iter()
            .map(Into::into)
            .filter(|v: &String| v != &canonical_term)
            .collect();

        Ok(SynonymEntry {
            canonical_term,
            variants,
        })
    }
}

/// Synonym lookup table of one locale.
///
/// Keys and variants are held in the locale's analyzed form (tokens joined
/// by single spaces), which is exactly what the query normalizer produces.
#[derive(Debug, Clone)]
pub struct SynonymTable {
    locale: String,
    entries: AHashMap<String, Vec<String>>,
    /// Longest canonical key, in tokens.
    max_phrase_len: usize,
}

impl SynonymTable {
    /// A table without entries.
    pub fn empty<S: Into<String>>(locale: S) -> Self {
        SynonymTable {
            locale: locale.into(),
            entries: AHashMap::new(),
            max_phrase_len: 1,
        }
    }

    /// Build a table from authored entries, normalizing every key and
    /// variant with the profile's analysis chain.
    ///
    /// Entries that share a canonical term after normalization are merged in
    /// load order. Entries left without variants are skipped.
    pub fn build<I>(profile: &LocaleProfile, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = SynonymEntry>,
    {
        let mut table = SynonymTable::empty(profile.code());

        for entry in entries {
            let key = profile.normalize_key(&entry.canonical_term)?;
            if key.is_empty() {
                log::warn!(
                    "locale {}: synonym canonical term '{}' normalizes to nothing, skipped",
                    profile.code(),
                    entry.canonical_term
                );
                continue;
            }

            let mut variants = Vec::with_capacity(entry.variants.len());
            for variant in &entry.variants {
                let normalized = profile.normalize_term(variant)?;
                // "theory of computation" is a self reference of the key
                // "theory computation".
                if !normalized.is_empty() && profile.normalize_key(variant)? != key {
                    variants.push(normalized);
                }
            }

            table.insert(key, variants);
        }

        table.entries.retain(|_, variants| !variants.is_empty());
        table.max_phrase_len = table
            .entries
            .keys()
            .map(|k| k.split(' ').count())
            .max()
            .unwrap_or(1);

        Ok(table)
    }

    /// Build a bidirectional table from equivalence groups: every member of
    /// a group maps to all the other members.
    pub fn from_groups(profile: &LocaleProfile, groups: Vec<Vec<String>>) -> Result<Self> {
        let mut entries = Vec::new();
        for group in groups {
            for (i, term) in group.iter().enumerate() {
                if term.trim().is_empty() {
                    continue;
                }
                let others = group
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, other)| other.clone());
                entries.push(SynonymEntry::new(term.clone(), others)?);
            }
        }
        Self::build(profile, entries)
    }

    /// Parse a JSON document.
    ///
    /// Two layouts are accepted:
    ///
    /// ```json
    /// { "algebra": ["algebraic math", "álgebra"] }
    /// ```
    ///
    /// ```json
    /// [["ml", "machine learning"], ["ai", "artificial intelligence"]]
    /// ```
    ///
    /// The object form is one-directional, the array form bidirectional.
    pub fn from_json_str(profile: &LocaleProfile, json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        match value {
            serde_json::Value::Object(_) => {
                let map: BTreeMap<String, Vec<String>> = serde_json::from_value(value)?;
                let mut entries = Vec::with_capacity(map.len());
                for (canonical, variants) in map {
                    if canonical.trim().is_empty() {
                        log::warn!(
                            "locale {}: empty synonym canonical term skipped",
                            profile.code()
                        );
                        continue;
                    }
                    entries.push(SynonymEntry::new(canonical, variants)?);
                }
                Self::build(profile, entries)
            }
            serde_json::Value::Array(_) => {
                let groups: Vec<Vec<String>> = serde_json::from_value(value)?;
                Self::from_groups(profile, groups)
            }
            _ => Err(PolyglotError::config(
                "synonym file must be a JSON object or an array of groups",
            )),
        }
    }

    /// Read and parse a synonym file.
    pub fn load_from_file<P: AsRef<Path>>(profile: &LocaleProfile, path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PolyglotError::config(format!(
                "failed to read synonym file '{}': {e}",
                path.display()
            ))
        })?;

        Self::from_json_str(profile, &content).map_err(|e| {
            PolyglotError::config(format!(
                "failed to parse synonym file '{}': {e}",
                path.display()
            ))
        })
    }

    fn insert(&mut self, key: String, variants: Vec<String>) {
        let slot = self.entries.entry(key.clone()).or_default();
        let mut seen: AHashSet<String> = slot.iter().cloned().collect();
        for variant in variants {
            if variant != key && seen.insert(variant.clone()) {
                slot.push(variant);
            }
        }
    }

    /// Variants of an already normalized term or phrase. Empty when the
    /// term is unknown.
    pub fn lookup(&self, normalized_term: &str) -> &[String] {
        self.entries
            .get(normalized_term)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, normalized_term: &str) -> bool {
        self.entries.contains_key(normalized_term)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Length in tokens of the longest canonical phrase, at least 1.
    pub fn max_phrase_len(&self) -> usize {
        self.max_phrase_len
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by key, for listing.
    pub fn entries(&self) -> Vec<(&str, &[String])> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocaleRegistry;

    fn profile(code: &str) -> std::sync::Arc<LocaleProfile> {
        LocaleRegistry::builtin().unwrap().resolve(code).unwrap()
    }

    #[test]
    fn test_entry_drops_self_reference() {
        let entry = SynonymEntry::new("algebra", vec!["algebra", "algebraic math"]).unwrap();
        assert_eq!(entry.variants, vec!["algebraic math"]);
        assert!(SynonymEntry::new("  ", Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_build_normalizes_and_dedupes() {
        let en = profile("en");
        let table = SynonymTable::build(
            &en,
            vec![
                SynonymEntry::new("Algebra", vec!["Algebraic  Math", "algebraic math", "ALGEBRA"])
                    .unwrap(),
                SynonymEntry::new("algebra", vec!["álgebra", "Linear Equations"]).unwrap(),
            ],
        )
        .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("algebra"), ["algebraic math", "linear equations"].map(String::from));
        assert!(table.lookup("geometry").is_empty());
    }

    #[test]
    fn test_self_reference_after_normalization_removed() {
        let fr = profile("fr");
        let table =
            SynonymTable::build(&fr, vec![SynonymEntry::new("élève", vec!["ELEVE"]).unwrap()])
                .unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_multi_word_phrase_length() {
        let en = profile("en");
        let table = SynonymTable::build(
            &en,
            vec![
                SynonymEntry::new("machine learning", vec!["ml"]).unwrap(),
                SynonymEntry::new("linear algebra course", vec!["matrix theory"]).unwrap(),
            ],
        )
        .unwrap();
        assert_eq!(table.max_phrase_len(), 3);
        assert_eq!(table.lookup("machine learning"), ["ml".to_string()]);
    }

    #[test]
    fn test_cjk_keys_use_bigram_form() {
        let zh = profile("zh-Hans");
        let table =
            SynonymTable::build(&zh, vec![SynonymEntry::new("神经网络", vec!["NN"]).unwrap()])
                .unwrap();
        assert!(table.contains("神经 经网 网络"));
        assert_eq!(table.max_phrase_len(), 3);
    }

    #[test]
    fn test_json_object_and_groups() {
        let en = profile("en");
        let table =
            SynonymTable::from_json_str(&en, r#"{"algebra": ["algebraic math"], "": ["x"]}"#)
                .unwrap();
        assert_eq!(table.lookup("algebra"), ["algebraic math".to_string()]);
        assert!(!table.contains("algebraic math"));

        let table = SynonymTable::from_json_str(&en, r#"[["ml", "machine learning"]]"#).unwrap();
        assert_eq!(table.lookup("ml"), ["machine learning".to_string()]);
        assert_eq!(table.lookup("machine learning"), ["ml".to_string()]);

        assert!(SynonymTable::from_json_str(&en, "42").is_err());
        assert!(SynonymTable::from_json_str(&en, "{not json").is_err());
    }

    #[test]
    fn test_load_from_missing_file() {
        let en = profile("en");
        let err = SynonymTable::load_from_file(&en, "/nonexistent/synonyms.json").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }
}
