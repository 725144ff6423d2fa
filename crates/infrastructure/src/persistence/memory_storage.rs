//! In-memory key/value storage.

use std::collections::HashMap;

use meridian_application::ports::{KeyValueStorage, StorageError};
use parking_lot::RwLock;

/// Keeps items in memory, optionally with a byte quota like browser local
/// storage.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStorage {
    items: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryKeyValueStorage {
    /// Unbounded storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage rejecting writes once keys and values exceed `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            items: RwLock::default(),
            quota: Some(bytes),
        }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl KeyValueStorage for MemoryKeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.write();
        if let Some(quota) = self.quota {
            let used: usize = items
                .iter()
                .filter(|(existing, _)| existing.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let size = key.len() + value.len();
            if used + size > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    size,
                });
            }
        }
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stores_and_removes() {
        let storage = MemoryKeyValueStorage::new();
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));

        storage.remove_item("k").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn quota_rejects_oversized_writes() {
        let storage = MemoryKeyValueStorage::with_quota(8);
        storage.set_item("k", "1234").unwrap();

        let error = storage.set_item("other", "1234").unwrap_err();

        assert_eq!(
            error,
            StorageError::QuotaExceeded {
                key: "other".into(),
                size: 9
            }
        );
        storage.set_item("k", "1234567").unwrap();
        assert_eq!(storage.len(), 1);
    }
}
