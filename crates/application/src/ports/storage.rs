//! Key/value storage port.

/// Error type for key/value storage backends.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The backend cannot be used at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Access to the backend was denied.
    #[error("storage access denied: {0}")]
    AccessDenied(String),

    /// Writing the value would exceed the backend quota.
    #[error("storage quota exceeded while writing {key} ({size} bytes)")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Size of the rejected value in bytes.
        size: usize,
    },

    /// Underlying I/O failure.
    #[error("storage I/O error: {0}")]
    Io(String),

    /// The stored data could not be encoded or decoded.
    #[error("storage serialization error: {0}")]
    Serialization(String),
}

/// Synchronous string key/value storage, the local storage of the client.
///
/// Implementations report every failure; callers that must never fail go
/// through [`crate::SafeLocalStorage`].
pub trait KeyValueStorage: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
