//! Failure-tolerant access to local storage.
//!
//! Nothing in here returns an error: a missing or broken backend degrades to
//! in-memory operation and every failure is reported as a warning.

use std::fmt;
use std::sync::Arc;

use meridian_domain::StorageKey;

use crate::ports::KeyValueStorage;

const PROBE_KEY: &str = "meridian-storage-probe";

/// Wrapper around an optional [`KeyValueStorage`] backend.
#[derive(Clone, Default)]
pub struct SafeLocalStorage {
    backend: Option<Arc<dyn KeyValueStorage>>,
}

impl fmt::Debug for SafeLocalStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeLocalStorage")
            .field("backend", &self.backend.is_some())
            .finish()
    }
}

impl SafeLocalStorage {
    /// Wraps a backend.
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// An accessor without any backend.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { backend: None }
    }

    /// Returns true when the backend exists and accepts a write.
    ///
    /// The check writes and removes a probe key.
    #[must_use]
    pub fn is_available(&self) -> bool {
        let Some(backend) = &self.backend else {
            return false;
        };
        match backend
            .set_item(PROBE_KEY, PROBE_KEY)
            .and_then(|()| backend.remove_item(PROBE_KEY))
        {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "local storage probe failed");
                false
            }
        }
    }

    /// Reads `key`; backend errors read as absent.
    #[must_use]
    pub fn get_item(&self, key: StorageKey) -> Option<String> {
        let backend = self.backend.as_ref()?;
        match backend.get_item(key.as_str()) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(%key, error = %e, "failed to read from local storage");
                None
            }
        }
    }

    /// Writes `key`; failures are logged and dropped.
    pub fn set_item(&self, key: StorageKey, value: &str) {
        let Some(backend) = &self.backend else {
            return;
        };
        if let Err(e) = backend.set_item(key.as_str(), value) {
            tracing::warn!(%key, error = %e, "failed to write to local storage");
        }
    }

    /// Removes `key`; failures are logged and dropped.
    pub fn remove_item(&self, key: StorageKey) {
        let Some(backend) = &self.backend else {
            return;
        };
        if let Err(e) = backend.remove_item(key.as_str()) {
            tracing::warn!(%key, error = %e, "failed to remove from local storage");
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory backends for unit tests.

    use std::collections::HashMap;

    use parking_lot::Mutex;

    use crate::ports::{KeyValueStorage, StorageError};

    /// Map-backed storage.
    #[derive(Default)]
    pub struct MapStorage {
        pub items: Mutex<HashMap<String, String>>,
    }

    impl KeyValueStorage for MapStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.items.lock().get(key).cloned())
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.items.lock().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            self.items.lock().remove(key);
            Ok(())
        }
    }

    /// Storage that rejects everything, like a browser in privacy mode.
    pub struct DeniedStorage;

    impl KeyValueStorage for DeniedStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::AccessDenied("denied".into()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::AccessDenied("denied".into()))
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::AccessDenied("denied".into()))
        }
    }
}
