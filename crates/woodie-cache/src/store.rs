//! Raw byte stores behind [`Cache`](crate::Cache).

use crate::CacheError;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// A key-value store of raw bytes.
pub trait KvStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove a value. Absent keys are not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check whether a key is present.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }

    /// All keys, sorted.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

/// In-process store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>>, CacheError> {
        self.entries
            .lock()
            .map_err(|e| CacheError::StoreError(e.to_string()))
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.lock()?.contains_key(key))
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}

const VALUE_SUFFIX: &str = ".json";
const TEMP_SUFFIX: &str = ".tmp";

/// Directory-backed store: one `<key>.json` file per key.
///
/// Bytes outside `[A-Za-z0-9_-]` in a key are written as `%XX`, so any
/// non-empty key maps to a single file inside the directory. Writes go to a
/// temporary file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", dir.display(), e)))?;
        debug!(dir = %dir.display(), "opened file store");
        Ok(Self { dir })
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
        if key.is_empty() {
            return Err(CacheError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}{}", encode_key(key), VALUE_SUFFIX)))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match fs::read(self.path_for(key)?) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        let temp = path.with_extension(format!("json{}", TEMP_SUFFIX));
        fs::write(&temp, value)?;
        fs::rename(&temp, &path)?;
        debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.path_for(key)?.is_file())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let name = entry?.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(stem) = name.strip_suffix(VALUE_SUFFIX) {
                if let Some(key) = decode_key(stem) {
                    keys.push(key);
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Everything but ASCII alphanumerics, `_` and `-` is escaped in file names.
const KEY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'_').remove(b'-');

fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, KEY_ESCAPE).to_string()
}

fn decode_key(encoded: &str) -> Option<String> {
    percent_decode_str(encoded)
        .decode_utf8()
        .ok()
        .map(|key| key.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &dyn KvStore) {
        assert_eq!(store.get("a").unwrap(), None);
        assert!(!store.exists("a").unwrap());

        store.set("a", b"1").unwrap();
        store.set("b", b"2").unwrap();
        store.set("a", b"3").unwrap();

        assert_eq!(store.get("a").unwrap(), Some(b"3".to_vec()));
        assert!(store.exists("b").unwrap());
        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);

        store.delete("a").unwrap();
        store.delete("a").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["b"]);
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        exercise(&FileStore::open(dir.path()).unwrap());
    }

    #[test]
    fn test_file_store_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("woodie").join("data");
        let store = FileStore::open(&nested).unwrap();
        store.set("woodie_cart_v1", b"[]").unwrap();
        assert!(nested.join("woodie_cart_v1.json").is_file());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        FileStore::open(dir.path()).unwrap().set("k", b"v").unwrap();
        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("k").unwrap(), Some(b"v".to_vec()));
    }

    #[test]
    fn test_file_store_escapes_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("../escape/cart:1", b"x").unwrap();

        assert!(!dir.path().join("..").join("escape").exists());
        assert_eq!(store.keys().unwrap(), vec!["../escape/cart:1"]);
        assert_eq!(store.get("../escape/cart:1").unwrap(), Some(b"x".to_vec()));
    }

    #[test]
    fn test_file_store_rejects_empty_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(store.set("", b"x"), Err(CacheError::InvalidKey(_))));
    }

    #[test]
    fn test_key_encoding() {
        assert_eq!(encode_key("woodie_cart_v1"), "woodie_cart_v1");
        assert_eq!(encode_key("a b"), "a%20b");
        assert_eq!(decode_key("a%20b").as_deref(), Some("a b"));
        assert_eq!(encode_key("cart/1:ক"), "cart%2F1%3A%E0%A6%95");
        assert_eq!(decode_key("cart%2F1%3A%E0%A6%95").as_deref(), Some("cart/1:ক"));
        assert_eq!(decode_key("bad%FF"), None);
    }
}
