//! Key-value store abstraction with typed JSON slots.

use std::marker::PhantomData;

use crate::StorageError;
use serde::{de::DeserializeOwned, Serialize};

/// A string-keyed store of string values.
///
/// Backends store raw strings. Encoding is the caller's business; see
/// [`Slot`] for the JSON view used by the cart.
pub trait Storage {
    /// Get the raw value stored under `key`.
    ///
    /// Returns `None` if the key doesn't exist.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        (**self).exists(key)
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        (**self).exists(key)
    }
}

/// A single key viewed as a JSON-encoded value of type `T`.
///
/// # Example
///
/// ```rust
/// use shopfront_storage::{MemoryStorage, Slot};
///
/// let storage = MemoryStorage::new();
/// let slot: Slot<u32> = Slot::new("visits");
/// assert_eq!(slot.read(&storage).unwrap(), None);
///
/// slot.write(&storage, &3).unwrap();
/// assert_eq!(slot.read(&storage).unwrap(), Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct Slot<T> {
    key: String,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Slot<T> {
    /// Create a slot for `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            _phantom: PhantomData,
        }
    }

    /// The storage key backing this slot.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Remove the stored value.
    pub fn clear<S: Storage + ?Sized>(&self, storage: &S) -> Result<(), StorageError> {
        storage.delete(&self.key)
    }
}

impl<T: DeserializeOwned> Slot<T> {
    /// Read and decode the stored value.
    ///
    /// Returns `Ok(None)` when nothing is stored, and
    /// `Err(StorageError::Serialize)` when the stored text is not a valid `T`.
    pub fn read<S: Storage + ?Sized>(&self, storage: &S) -> Result<Option<T>, StorageError> {
        match storage.get(&self.key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}

impl<T: Serialize> Slot<T> {
    /// Encode and store `value`, returning the number of bytes written.
    pub fn write<S: Storage + ?Sized>(&self, storage: &S, value: &T) -> Result<usize, StorageError> {
        let raw = serde_json::to_string(value)?;
        storage.set(&self.key, &raw)?;
        tracing::debug!(key = %self.key, bytes = raw.len(), "slot written");
        Ok(raw.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    #[test]
    fn test_slot_read_missing() {
        let storage = MemoryStorage::new();
        let slot: Slot<Vec<u32>> = Slot::new("missing");
        assert!(slot.read(&storage).unwrap().is_none());
    }

    #[test]
    fn test_slot_write_then_read() {
        let storage = MemoryStorage::new();
        let slot: Slot<Vec<u32>> = Slot::new("numbers");

        let written = slot.write(&storage, &vec![1, 2, 3]).unwrap();
        assert_eq!(written, "[1,2,3]".len());
        assert_eq!(storage.get("numbers").unwrap().as_deref(), Some("[1,2,3]"));
        assert_eq!(slot.read(&storage).unwrap(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_slot_read_malformed() {
        let storage = MemoryStorage::new();
        storage.set("numbers", "{not json").unwrap();

        let slot: Slot<Vec<u32>> = Slot::new("numbers");
        let err = slot.read(&storage).unwrap_err();
        assert!(matches!(err, StorageError::Serialize(_)));
    }

    #[test]
    fn test_slot_clear() {
        let storage = MemoryStorage::new();
        let slot: Slot<bool> = Slot::new("flag");
        slot.write(&storage, &true).unwrap();

        slot.clear(&storage).unwrap();
        assert!(!storage.exists("flag").unwrap());
    }

    #[test]
    fn test_boxed_storage() {
        let storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        assert!(storage.exists("k").unwrap());
    }
}
