// ============================================================================
// KEY/VALUE STORAGE - localStorage in the browser, a HashMap elsewhere
// ============================================================================

use serde::{de::DeserializeOwned, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("localStorage is not available")]
    Unavailable,
    #[error("Error writing key {0}")]
    Write(String),
    #[error("Error reading key {0}")]
    Read(String),
    #[error("Error removing key {0}")]
    Remove(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// String blobs addressed by fixed keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}

pub fn save_json<S: KeyValueStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let json =
        serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
    store.set(key, &json)
}

/// Reads and parses a blob. `Ok(None)` when the key is missing; a parse
/// failure is reported as `StorageError::Serialization`.
pub fn load_json<S: KeyValueStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> StorageResult<Option<T>> {
    match store.get(key)? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StorageError::Serialization(e.to_string())),
        None => Ok(None),
    }
}

/// In-memory store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `set` fail, as a full or disabled localStorage does.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.get() {
            return Err(StorageError::Write(key.to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{KeyValueStore, StorageError, StorageResult};
    use web_sys::{window, Storage};

    /// `window.localStorage`. Resolved on every call so a storage that gets
    /// disabled mid-session only fails that call.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct BrowserStorage;

    impl BrowserStorage {
        fn storage() -> StorageResult<Storage> {
            window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .ok_or(StorageError::Unavailable)
        }
    }

    impl KeyValueStore for BrowserStorage {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            Self::storage()?
                .get_item(key)
                .map_err(|_| StorageError::Read(key.to_string()))
        }

        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            Self::storage()?
                .set_item(key, value)
                .map_err(|_| StorageError::Write(key.to_string()))
        }

        fn remove(&self, key: &str) -> StorageResult<()> {
            Self::storage()?
                .remove_item(key)
                .map_err(|_| StorageError::Remove(key.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_helpers_round_trip_through_store() {
        let store = MemoryStorage::new();
        save_json(&store, "k", &vec![1, 2, 3]).unwrap();
        let loaded: Option<Vec<i32>> = load_json(&store, "k").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));
        let missing: Option<Vec<i32>> = load_json(&store, "other").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn corrupt_blob_is_a_serialization_error() {
        let store = MemoryStorage::new();
        store.set("k", "{not json").unwrap();
        let result: StorageResult<Option<Vec<i32>>> = load_json(&store, "k");
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn failing_writes_leave_previous_value() {
        let store = MemoryStorage::new();
        store.set("k", "a").unwrap();
        let clone = store.clone();
        clone.set_fail_writes(true);
        assert_eq!(store.set("k", "b"), Err(StorageError::Write("k".to_string())));
        assert_eq!(store.raw("k").as_deref(), Some("a"));
    }
}
