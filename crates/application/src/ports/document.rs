//! Document source ports.

use std::future::Future;

use meridian_domain::{RequestDefinition, WorkspaceDocument};

/// Error type for document loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// The document URL is malformed.
    #[error("invalid document URL: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-success status.
    #[error("fetching {url} failed with status {status}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The request could not be sent or the body could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The document is neither valid JSON nor valid YAML.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// The document root is not an object.
    #[error("document root must be an object")]
    NotAnObject,
}

/// A parsed document with the requests it defines.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedDocument {
    /// Name the document is stored under.
    pub name: String,
    /// The document tree.
    pub document: WorkspaceDocument,
    /// One request per path and method.
    pub requests: Vec<RequestDefinition>,
}

/// Fetches raw document text from a URL.
pub trait DocumentFetcher: Send + Sync {
    /// Downloads the document at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the request fails or the
    /// server does not answer with a success status.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, DocumentError>> + Send;
}

/// Turns raw document text into a workspace document.
pub trait DocumentImporter: Send + Sync {
    /// Parses `source` (JSON or YAML).
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed or its root is not an
    /// object.
    fn import(&self, source: &str) -> Result<ImportedDocument, DocumentError>;
}
