//! Locale registry: resolves locale codes to profiles.

use std::sync::Arc;

use ahash::AHashMap;

use crate::error::{PolyglotError, Result};
use crate::locale::builtin;
use crate::locale::profile::{LocaleDefinition, LocaleProfile};

/// Read-only map from locale code to [`LocaleProfile`].
///
/// Lookups are case-insensitive and treat `_` like `-`, so `zh_hans`
/// resolves to the `zh-Hans` profile. That is canonicalization only: an
/// unknown language never falls back to another profile.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    profiles: AHashMap<String, Arc<LocaleProfile>>,
}

/// Canonical lookup form of a locale code.
pub(crate) fn lookup_key(code: &str) -> String {
    code.trim().replace('_', "-").to_ascii_lowercase()
}

impl LocaleRegistry {
    /// Build a registry from definitions.
    ///
    /// Invalid or duplicate definitions are skipped with a warning. Fails
    /// when no profile could be built, since nothing could be served.
    pub fn from_definitions<I>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = LocaleDefinition>,
    {
        let mut profiles = AHashMap::new();

        for definition in definitions {
            let code = definition.code.clone();
            let profile = match LocaleProfile::from_definition(definition) {
                Ok(profile) => profile,
                Err(e) => {
                    log::warn!("skipping locale '{code}': {e}");
                    continue;
                }
            };

            let key = lookup_key(profile.code());
            if profiles.contains_key(&key) {
                log::warn!("skipping duplicate locale '{}'", profile.code());
                continue;
            }
            profiles.insert(key, Arc::new(profile));
        }

        if profiles.is_empty() {
            return Err(PolyglotError::config(
                "no locale profile could be loaded; refusing to serve searches",
            ));
        }

        log::info!("locale registry loaded with {} profiles", profiles.len());
        Ok(LocaleRegistry { profiles })
    }

    /// Registry with the built-in catalogue of supported locales.
    pub fn builtin() -> Result<Self> {
        Self::from_definitions(builtin::definitions())
    }

    /// Resolve a locale code to its profile.
    pub fn resolve(&self, code: &str) -> Result<Arc<LocaleProfile>> {
        self.profiles
            .get(&lookup_key(code))
            .cloned()
            .ok_or_else(|| PolyglotError::unsupported_locale(code))
    }

    /// Whether the code resolves to a profile.
    pub fn contains(&self, code: &str) -> bool {
        self.profiles.contains_key(&lookup_key(code))
    }

    /// Canonical codes of all registered locales, sorted.
    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self
            .profiles
            .values()
            .map(|p| p.code().to_string())
            .collect();
        codes.sort();
        codes
    }

    /// All profiles, sorted by code.
    pub fn profiles(&self) -> Vec<Arc<LocaleProfile>> {
        let mut profiles: Vec<_> = self.profiles.values().cloned().collect();
        profiles.sort_by(|a, b| a.code().cmp(b.code()));
        profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
