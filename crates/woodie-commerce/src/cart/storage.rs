//! Cart persistence.
//!
//! The cart store takes its storage as a load/save pair so any key-value
//! backend can hold the cart. The persisted form is the JSON list of
//! [`CartLine`] records under [`CART_STORAGE_KEY`].

use crate::cart::CartLine;
use crate::error::CommerceError;
use std::sync::{Arc, Mutex};

/// Key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "woodie_cart_v1";

/// Backend that persists the cart lines.
pub trait CartStorage {
    /// Read the stored lines. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<CartLine>>, CommerceError>;

    /// Replace the stored lines.
    fn save(&self, lines: &[CartLine]) -> Result<(), CommerceError>;
}

impl<T: CartStorage + ?Sized> CartStorage for Box<T> {
    fn load(&self) -> Result<Option<Vec<CartLine>>, CommerceError> {
        (**self).load()
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), CommerceError> {
        (**self).save(lines)
    }
}

/// In-process storage holding the serialized cart.
///
/// Clones share the same slot, so a test can keep a handle and inspect
/// what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryCartStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a raw serialized value.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// The raw serialized value, if any.
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl CartStorage for MemoryCartStorage {
    fn load(&self) -> Result<Option<Vec<CartLine>>, CommerceError> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| CommerceError::StorageError(e.to_string()))?;
        match slot.as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), CommerceError> {
        let raw = serde_json::to_string(lines)?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| CommerceError::StorageError(e.to_string()))?;
        *slot = Some(raw);
        Ok(())
    }
}

/// Cart storage backed by a `woodie_cache::Cache`.
#[cfg(feature = "storage")]
pub struct KvCartStorage {
    cache: woodie_cache::Cache,
    key: String,
}

#[cfg(feature = "storage")]
impl KvCartStorage {
    /// Persist under the default cart key.
    pub fn new(cache: woodie_cache::Cache) -> Self {
        Self::with_key(cache, CART_STORAGE_KEY)
    }

    /// Persist under a custom key.
    pub fn with_key(cache: woodie_cache::Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
        }
    }

    /// The key lines are stored under.
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(feature = "storage")]
impl CartStorage for KvCartStorage {
    fn load(&self) -> Result<Option<Vec<CartLine>>, CommerceError> {
        Ok(self.cache.get::<Vec<CartLine>>(&self.key)?)
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), CommerceError> {
        Ok(self.cache.set(&self.key, lines)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartItem, Quantity};
    use crate::money::Money;

    #[test]
    fn test_memory_storage_empty() {
        let storage = MemoryCartStorage::new();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_memory_storage_save_load() {
        let storage = MemoryCartStorage::new();
        let line = CartItem::new("a", "A", Money::from_taka(10)).to_line(Quantity::from(2));
        storage.save(std::slice::from_ref(&line)).unwrap();

        let handle = storage.clone();
        assert_eq!(handle.load().unwrap(), Some(vec![line]));
        assert!(handle.raw().unwrap().contains("\"qty\":2"));
    }

    #[test]
    fn test_memory_storage_rejects_garbage() {
        let storage = MemoryCartStorage::with_raw("{not json");
        assert!(matches!(
            storage.load(),
            Err(CommerceError::SerializationError(_))
        ));
    }

    #[cfg(feature = "storage")]
    #[test]
    fn test_kv_storage_uses_cart_key() {
        let cache = woodie_cache::Cache::memory();
        let storage = KvCartStorage::new(cache.clone());
        let line = CartItem::new("a", "A", Money::from_taka(10)).to_line(Quantity::ONE);
        storage.save(&[line.clone()]).unwrap();

        assert!(cache.exists(CART_STORAGE_KEY).unwrap());
        assert_eq!(storage.load().unwrap(), Some(vec![line]));
    }
}
