//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{Storage, StorageError};

/// Process-local storage backed by a `HashMap`.
///
/// Clones share the same map, so two handles behave like two browser tabs
/// on one origin: each writer replaces the whole value and the last write
/// wins.
///
/// An optional byte quota (keys plus values, like browser storage) and an
/// availability switch make write failures reproducible in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, String>,
    quota: Option<usize>,
    unavailable: bool,
}

impl Inner {
    fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl MemoryStorage {
    /// Create an empty, unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects writes beyond `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        let storage = Self::default();
        if let Ok(mut inner) = storage.inner.lock() {
            inner.quota = Some(quota);
        }
        storage
    }

    /// Make every subsequent operation fail with [`StorageError::Unavailable`]
    /// (or succeed again when `unavailable` is false).
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.unavailable = unavailable;
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.lock().map(|i| i.entries.len()).unwrap_or(0)
    }

    /// Check if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StorageError> {
        let inner = self
            .inner
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        if inner.unavailable {
            return Err(StorageError::Unavailable("memory store disabled".to_string()));
        }
        Ok(inner)
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.lock()?;

        if let Some(quota) = inner.quota {
            let previous = inner.entries.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let needed = inner.used_bytes() - previous + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        inner.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.entries.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.lock()?.entries.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_delete() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());

        storage.set("a", "1").unwrap();
        assert_eq!(storage.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(storage.len(), 1);

        storage.delete("a").unwrap();
        assert_eq!(storage.get("a").unwrap(), None);

        // Deleting again is fine
        storage.delete("a").unwrap();
    }

    #[test]
    fn test_clones_share_entries() {
        let tab_a = MemoryStorage::new();
        let tab_b = tab_a.clone();

        tab_a.set("cart", "first").unwrap();
        tab_b.set("cart", "second").unwrap();

        assert_eq!(tab_a.get("cart").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_quota_exceeded() {
        let storage = MemoryStorage::with_quota(10);
        storage.set("k", "12345").unwrap();

        let err = storage.set("other", "123456").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded { needed: 17, quota: 10 }
        ));

        // Failed write leaves the previous value in place
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("12345"));
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let storage = MemoryStorage::with_quota(10);
        storage.set("k", "123456789").unwrap();
        storage.set("k", "987654321").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("987654321"));
    }

    #[test]
    fn test_unavailable() {
        let storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();
        storage.set_unavailable(true);

        assert!(matches!(
            storage.set("k", "w"),
            Err(StorageError::Unavailable(_))
        ));
        assert!(storage.get("k").is_err());

        storage.set_unavailable(false);
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    }
}
