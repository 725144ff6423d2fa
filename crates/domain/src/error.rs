//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The `target/client` pair is not a known HTTP client.
    #[error("unknown HTTP client: {0}")]
    UnknownClient(String),

    /// A dotted document path is empty or contains an empty segment.
    #[error("invalid document path: {0:?}")]
    InvalidPath(String),

    /// A document path walks through a value that is not an object.
    #[error("path {path:?} crosses a non-object value at {segment:?}")]
    NotAnObject {
        /// The full path being written.
        path: String,
        /// The segment whose parent is not an object.
        segment: String,
    },

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
