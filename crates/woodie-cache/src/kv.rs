//! Key-value cache wrapper with automatic serialization.

use crate::store::{FileStore, KvStore, MemoryStore};
use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Type-safe cache over any [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Clones share the same store.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KvStore>,
}

impl Cache {
    /// Wrap a store.
    pub fn new(store: impl KvStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// A cache backed by a fresh in-process store.
    pub fn memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// A cache backed by a directory on disk.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open_dir("/home/me/.local/share/woodie")?;
    /// ```
    pub fn open_dir(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        Ok(Self::new(FileStore::open(dir)?))
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and an error if the stored
    /// bytes are not valid JSON for `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Line {
        id: String,
        qty: u32,
    }

    #[test]
    fn test_set_get_round_trip() {
        let cache = Cache::memory();
        let lines = vec![Line { id: "a".into(), qty: 2 }];
        cache.set("cart", &lines).unwrap();

        let back: Option<Vec<Line>> = cache.get("cart").unwrap();
        assert_eq!(back, Some(lines));
    }

    #[test]
    fn test_missing_key() {
        let cache = Cache::memory();
        let value: Option<Line> = cache.get("nope").unwrap();
        assert!(value.is_none());
        assert!(!cache.exists("nope").unwrap());
    }

    #[test]
    fn test_wrong_shape_is_serialize_error() {
        let cache = Cache::memory();
        cache.set("cart", "not a list").unwrap();
        let result: Result<Option<Vec<Line>>, _> = cache.get("cart");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_clones_share_store() {
        let cache = Cache::memory();
        let other = cache.clone();
        cache.set("k", &1u32).unwrap();
        assert_eq!(other.get::<u32>("k").unwrap(), Some(1));
        other.delete("k").unwrap();
        assert!(cache.keys().unwrap().is_empty());
    }

    #[test]
    fn test_open_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open_dir(dir.path()).unwrap();
        cache.set("woodie_cart_v1", &Vec::<Line>::new()).unwrap();
        assert_eq!(cache.keys().unwrap(), vec!["woodie_cart_v1"]);
    }
}
