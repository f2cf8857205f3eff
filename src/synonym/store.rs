//! Per-locale synonym slots with atomic reload.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::error::{PolyglotError, Result};
use crate::locale::{LocaleProfile, LocaleRegistry};
use crate::synonym::table::{SynonymEntry, SynonymTable};

#[derive(Debug)]
struct Slot {
    table: RwLock<Arc<SynonymTable>>,
    generation: AtomicU64,
}

impl Slot {
    fn new(table: SynonymTable) -> Self {
        Slot {
            table: RwLock::new(Arc::new(table)),
            generation: AtomicU64::new(0),
        }
    }
}

/// Holds the current synonym table of every registered locale.
///
/// The lock of a slot guards only the pointer: readers clone the `Arc`,
/// writers replace it. Tables are always built before the lock is taken.
#[derive(Debug)]
pub struct SynonymStore {
    registry: Arc<LocaleRegistry>,
    slots: AHashMap<String, Slot>,
}

impl SynonymStore {
    /// A store with an empty table for every locale of the registry.
    pub fn new(registry: Arc<LocaleRegistry>) -> Self {
        let slots = registry
            .codes()
            .into_iter()
            .map(|code| {
                let slot = Slot::new(SynonymTable::empty(code.clone()));
                (code, slot)
            })
            .collect();

        SynonymStore { registry, slots }
    }

    /// Load the configured synonym files at startup.
    ///
    /// Unlike a runtime reload, any failure here is a configuration error.
    pub fn load_all(&self, sources: &BTreeMap<String, PathBuf>) -> Result<()> {
        for (locale, path) in sources {
            let profile = self.registry.resolve(locale).map_err(|_| {
                PolyglotError::config(format!(
                    "synonym file configured for unsupported locale '{locale}'"
                ))
            })?;
            let table = SynonymTable::load_from_file(&profile, path)?;
            self.install(&profile, table);
        }
        Ok(())
    }

    fn slot(&self, profile: &LocaleProfile) -> Result<&Slot> {
        self.slots
            .get(profile.code())
            .ok_or_else(|| PolyglotError::unsupported_locale(profile.code()))
    }

    /// The current table of a locale. Hold on to the returned snapshot for
    /// the whole request.
    pub fn snapshot(&self, locale: &str) -> Result<Arc<SynonymTable>> {
        let profile = self.registry.resolve(locale)?;
        let slot = self.slot(&profile)?;
        Ok(Arc::clone(&slot.table.read()))
    }

    /// Variants of a raw term, normalized with the locale's analysis chain.
    pub fn expand(&self, locale: &str, term: &str) -> Result<Vec<String>> {
        let profile = self.registry.resolve(locale)?;
        let key = profile.normalize_key(term)?;
        let table = self.snapshot(profile.code())?;
        Ok(table.lookup(&key).to_vec())
    }

    /// Number of successful reloads of a locale since startup.
    pub fn generation(&self, locale: &str) -> Result<u64> {
        let profile = self.registry.resolve(locale)?;
        Ok(self.slot(&profile)?.generation.load(Ordering::Acquire))
    }

    /// Replace a locale's table with one built by `build`.
    ///
    /// On failure the previous table stays in place and the error is
    /// returned. Returns the new generation on success.
    pub fn reload_with<F>(&self, locale: &str, build: F) -> Result<u64>
    where
        F: FnOnce(&LocaleProfile) -> Result<SynonymTable>,
    {
        let profile = self.registry.resolve(locale)?;
        match build(&profile) {
            Ok(table) => Ok(self.install(&profile, table)),
            Err(e) => {
                log::warn!(
                    "synonym reload for locale {} failed, keeping last-known-good table: {e}",
                    profile.code()
                );
                Err(e)
            }
        }
    }

    /// Replace a locale's table from authored entries.
    pub fn reload_entries(&self, locale: &str, entries: Vec<SynonymEntry>) -> Result<u64> {
        self.reload_with(locale, |profile| SynonymTable::build(profile, entries))
    }

    /// Replace a locale's table from a synonym file.
    pub fn reload_from_file<P: AsRef<Path>>(&self, locale: &str, path: P) -> Result<u64> {
        let path = path.as_ref();
        self.reload_with(locale, |profile| SynonymTable::load_from_file(profile, path))
    }

    fn install(&self, profile: &LocaleProfile, table: SynonymTable) -> u64 {
        let Some(slot) = self.slots.get(profile.code()) else {
            // Slots are created for every registry code.
            return 0;
        };

        let entries = table.len();
        let table = Arc::new(table);
        let generation = {
            let mut guard = slot.table.write();
            *guard = table;
            slot.generation.fetch_add(1, Ordering::AcqRel) + 1
        };

        log::info!(
            "synonyms for locale {} loaded: {entries} entries, generation {generation}",
            profile.code()
        );
        generation
    }

    pub fn registry(&self) -> &Arc<LocaleRegistry> {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::error::ErrorKind;

    fn store() -> SynonymStore {
        SynonymStore::new(Arc::new(LocaleRegistry::builtin().unwrap()))
    }

    #[test]
    fn test_empty_store_expands_to_nothing() {
        let store = store();
        assert!(store.expand("en", "algebra").unwrap().is_empty());
        assert_eq!(store.generation("en").unwrap(), 0);
    }

    #[test]
    fn test_unknown_locale() {
        let store = store();
        let err = store.expand("xx", "algebra").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedLocale);
    }

    #[test]
    fn test_reload_swaps_table_and_bumps_generation() {
        let store = store();
        let before = store.snapshot("en").unwrap();

        let generation = store
            .reload_entries(
                "en",
                vec![SynonymEntry::new("algebra", vec!["algebraic math"]).unwrap()],
            )
            .unwrap();

        assert_eq!(generation, 1);
        assert!(before.is_empty());
        assert_eq!(store.snapshot("EN").unwrap().len(), 1);
        // Other locales are untouched.
        assert!(store.snapshot("fr").unwrap().is_empty());
    }

    #[test]
    fn test_failed_reload_keeps_last_known_good() {
        let store = store();
        store
            .reload_entries(
                "en",
                vec![SynonymEntry::new("algebra", vec!["algebraic math"]).unwrap()],
            )
            .unwrap();

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{broken").unwrap();

        assert!(store.reload_from_file("en", file.path()).is_err());
        assert_eq!(store.generation("en").unwrap(), 1);
        assert_eq!(store.expand("en", "Algebra").unwrap(), vec!["algebraic math"]);
    }

    #[test]
    fn test_reload_from_file() {
        let store = store();
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"الجبر": ["علم الجبر"]}}"#).unwrap();

        store.reload_from_file("ar", file.path()).unwrap();
        assert_eq!(store.expand("ar", "الجبر").unwrap(), vec!["علم الجبر"]);
    }

    #[test]
    fn test_load_all_rejects_unknown_locale() {
        let store = store();
        let mut sources = BTreeMap::new();
        sources.insert("xx".to_string(), PathBuf::from("/tmp/none.json"));

        let err = store.load_all(&sources).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
