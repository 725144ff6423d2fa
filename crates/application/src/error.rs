//! Application error types

use meridian_domain::DomainError;
use thiserror::Error;

use crate::ports::{DocumentError, StorageError};
use crate::router::RouterError;
use crate::store::StoreError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A store mutation was rejected.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Navigation failed.
    #[error("router error: {0}")]
    Router(#[from] RouterError),

    /// A document could not be fetched or parsed.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// A storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
