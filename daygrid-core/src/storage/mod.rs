//! Key-value persistence for JSON values.
//!
//! `KeyValueStore` is the raw string store (a browser's local storage, a
//! directory of files, a map in memory). `Storage` layers JSON on top and
//! never fails: errors are logged and treated as "value absent".

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{error, warn};

use crate::error::DayGridResult;

/// A string-keyed store of string values.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> DayGridResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> DayGridResult<()>;
    fn remove_item(&self, key: &str) -> DayGridResult<()>;
    /// Remove every entry.
    fn clear(&self) -> DayGridResult<()>;
}

/// JSON view over a `KeyValueStore`.
#[derive(Debug, Clone)]
pub struct Storage<S> {
    store: S,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Storage { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serialize and store `value`, overwriting any previous entry.
    /// Returns whether the write went through.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let result: DayGridResult<()> = serde_json::to_string(value)
            .map_err(Into::into)
            .and_then(|json| self.store.set_item(key, &json));

        match result {
            Ok(()) => true,
            Err(e) => {
                error!(key = %key, "Failed to save value: {e}");
                false
            }
        }
    }

    /// The stored value, or `default` if it is missing or cannot be read.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.store.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                error!(key = %key, "Failed to load value: {e}");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, "Ignoring unreadable stored value: {e}");
                default
            }
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.store.remove_item(key) {
            error!(key = %key, "Failed to remove value: {e}");
        }
    }

    pub fn clear_all(&self) {
        if let Err(e) = self.store.clear() {
            error!("Failed to clear storage: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        theme: String,
        week_numbers: bool,
    }

    #[test]
    fn test_save_then_load() {
        let storage = Storage::new(MemoryStore::new());
        let prefs = Prefs {
            theme: "dark".to_string(),
            week_numbers: true,
        };

        assert!(storage.save("prefs", &prefs));
        let loaded: Option<Prefs> = storage.load("prefs", None);
        assert_eq!(loaded, Some(prefs));
    }

    #[test]
    fn test_load_missing_returns_default() {
        let storage = Storage::new(MemoryStore::new());
        assert_eq!(storage.load("nothing", 7), 7);
    }

    #[test]
    fn test_load_corrupt_json_returns_default() {
        let store = MemoryStore::new();
        store.set_item("broken", "{not json").unwrap();

        let storage = Storage::new(store);
        let loaded: Vec<String> = storage.load("broken", vec!["fallback".to_string()]);
        assert_eq!(loaded, vec!["fallback".to_string()]);
    }

    #[test]
    fn test_save_over_quota_is_swallowed() {
        let storage = Storage::new(MemoryStore::with_quota(8));
        assert!(!storage.save("big", &"this string is far too long"));
        assert_eq!(storage.load("big", String::new()), "");
    }

    #[test]
    fn test_remove_and_clear_all() {
        let storage = Storage::new(MemoryStore::new());
        storage.save("a", &1);
        storage.save("b", &2);

        storage.remove("a");
        assert_eq!(storage.load("a", 0), 0);
        assert_eq!(storage.load("b", 0), 2);

        storage.clear_all();
        assert!(storage.store().is_empty());
    }
}
