//! Service configuration.
//!
//! Configuration is a single JSON document; every section and field is
//! optional and falls back to its default.
//!
//! ```json
//! {
//!   "synonyms": { "en": "synonyms/en.json" },
//!   "expansion": { "synonym_weight": 0.7 },
//!   "ranking": { "recency": 0.15, "popularity": 0.15 },
//!   "engine": { "timeout_ms": 1500 },
//!   "pagination": { "max_page_size": 50 }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PolyglotError, Result};
use crate::locale::registry::lookup_key;
use crate::locale::{LocaleDefinition, LocaleRegistry, builtin};
use crate::query::{ExpansionConfig, NormalizerConfig};
use crate::ranking::RankingWeights;

/// Engine call settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound for a single engine call.
    pub timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig { timeout_ms: 2_000 }
    }
}

impl EngineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Bounds on requested pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub max_page_size: usize,
    /// Largest `page_offset + page_size`; bounds the re-ranked window.
    pub max_result_window: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        PaginationConfig {
            max_page_size: 100,
            max_result_window: 1_000,
        }
    }
}

/// Complete configuration of the search layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Locale profile definitions. Entries replace the built-in profile
    /// with the same code; other codes are added to the catalogue.
    pub locales: Vec<LocaleDefinition>,
    /// Synonym file per locale.
    pub synonyms: BTreeMap<String, PathBuf>,
    pub expansion: ExpansionConfig,
    pub normalizer: NormalizerConfig,
    pub ranking: RankingWeights,
    pub engine: EngineConfig,
    pub pagination: PaginationConfig,
}

impl ServiceConfig {
    /// Read a configuration file. Relative synonym paths are resolved
    /// against the directory of the file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PolyglotError::config(format!("failed to read config '{}': {e}", path.display()))
        })?;
        let mut config = Self::from_json_str(&content).map_err(|e| {
            PolyglotError::config(format!("failed to parse config '{}': {e}", path.display()))
        })?;

        if let Some(base) = path.parent() {
            for synonym_path in config.synonyms.values_mut() {
                if synonym_path.is_relative() {
                    *synonym_path = base.join(&*synonym_path);
                }
            }
        }

        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ServiceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges. Locale and synonym problems surface when the
    /// registry and tables are built.
    pub fn validate(&self) -> Result<()> {
        self.expansion.validate()?;
        self.ranking.validate()?;

        if self.normalizer.max_query_terms == 0 {
            return Err(PolyglotError::config("max_query_terms must be at least 1"));
        }
        if self.engine.timeout_ms == 0 {
            return Err(PolyglotError::config("engine timeout_ms must be at least 1"));
        }
        if self.pagination.max_page_size == 0 {
            return Err(PolyglotError::config("max_page_size must be at least 1"));
        }
        if self.pagination.max_result_window < self.pagination.max_page_size {
            return Err(PolyglotError::config(format!(
                "max_result_window ({}) is smaller than max_page_size ({})",
                self.pagination.max_result_window, self.pagination.max_page_size
            )));
        }
        Ok(())
    }

    /// Built-in definitions with the configured overrides applied.
    pub fn locale_definitions(&self) -> Vec<LocaleDefinition> {
        let mut definitions = builtin::definitions();
        for custom in &self.locales {
            let key = lookup_key(&custom.code);
            match definitions.iter_mut().find(|d| lookup_key(&d.code) == key) {
                Some(existing) => {
                    // Keep the built-in spelling of the code.
                    let code = std::mem::take(&mut existing.code);
                    *existing = custom.clone();
                    existing.code = code;
                }
                None => definitions.push(custom.clone()),
            }
        }
        definitions
    }

    pub fn build_registry(&self) -> Result<LocaleRegistry> {
        LocaleRegistry::from_definitions(self.locale_definitions())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;
    use crate::analysis::token_filter::CaseFolding;
    use crate::error::ErrorKind;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ServiceConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.engine.timeout(), Duration::from_secs(2));
        assert_eq!(config.build_registry().unwrap().len(), 14);
    }

    #[test]
    fn test_invalid_values_rejected() {
        for json in [
            r#"{"expansion": {"synonym_weight": 1.2}}"#,
            r#"{"ranking": {"popularity": -1.0}}"#,
            r#"{"engine": {"timeout_ms": 0}}"#,
            r#"{"pagination": {"max_page_size": 200, "max_result_window": 100}}"#,
            r#"{"normalizer": {"max_query_terms": 0}}"#,
        ] {
            let err = ServiceConfig::from_json_str(json).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config, "{json}");
        }
    }

    #[test]
    fn test_locale_overrides() {
        let config = ServiceConfig::from_json_str(
            r#"{"locales": [
                {"code": "EN", "case_folding": "none"},
                {"code": "sw", "stopwords": ["na"]}
            ]}"#,
        )
        .unwrap();

        let registry = config.build_registry().unwrap();
        assert_eq!(registry.len(), 15);
        assert_eq!(
            registry.resolve("en").unwrap().case_folding(),
            CaseFolding::None
        );
        assert!(registry.contains("sw"));
    }

    #[test]
    fn test_override_code_is_canonicalized() {
        let config = ServiceConfig::from_json_str(
            r#"{"locales": [
                {"code": "zh_hans", "tokenizer": "cjk_bigram", "stopwords": ["的"]}
            ]}"#,
        )
        .unwrap();

        let definitions = config.locale_definitions();
        assert_eq!(definitions.len(), 14);

        let registry = config.build_registry().unwrap();
        assert_eq!(registry.len(), 14);
        let zh = registry.resolve("zh-Hans").unwrap();
        assert_eq!(zh.code(), "zh-Hans");
        assert_eq!(zh.stopwords().len(), 1);
    }

    #[test]
    fn test_load_resolves_relative_synonym_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("service.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{"synonyms": {{"en": "syn/en.json", "fr": "/abs/fr.json"}}}}"#).unwrap();

        let config = ServiceConfig::load(&path).unwrap();
        assert_eq!(config.synonyms["en"], dir.path().join("syn/en.json"));
        assert_eq!(config.synonyms["fr"], PathBuf::from("/abs/fr.json"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ServiceConfig::load("/nonexistent/service.json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
