//! Workspace model.
//!
//! A workspace owns the documents loaded into the client, the request
//! definitions derived from them, and a handful of client-wide preferences
//! stored as `x-scalar-*` extensions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::client::ClientId;
use crate::document::WorkspaceDocument;
use crate::error::{DomainError, DomainResult};
use crate::request::{HttpMethod, RequestDefinition};

/// Uid of the workspace created when nothing else is available.
pub const DEFAULT_WORKSPACE_UID: &str = "default";

/// Name of the workspace created when nothing else is available.
pub const DEFAULT_WORKSPACE_NAME: &str = "Default Workspace";

/// Checks that `raw` is an absolute `http` or `https` URL usable as a
/// proxy and returns it trimmed.
///
/// # Errors
///
/// Returns [`DomainError::InvalidUrl`] otherwise.
pub fn validate_proxy_url(raw: &str) -> DomainResult<String> {
    let trimmed = raw.trim();
    let url = url::Url::parse(trimmed).map_err(|e| DomainError::InvalidUrl(format!("{e}: {raw}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(DomainError::InvalidUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Top-level container for API documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    /// Unique identifier.
    pub uid: String,
    /// Display name.
    pub name: String,
    /// Proxy used for outgoing requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    /// Preferred code sample client.
    #[serde(
        default,
        rename = "x-scalar-default-client",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_client: Option<ClientId>,
    /// Dark mode flag.
    #[serde(default, rename = "x-scalar-dark-mode")]
    pub dark_mode: bool,
    /// Name of the active document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_document: Option<String>,
    /// Documents keyed by name.
    #[serde(default)]
    pub documents: BTreeMap<String, WorkspaceDocument>,
    /// Requests of all documents, in insertion order.
    #[serde(default)]
    pub requests: Vec<RequestDefinition>,
}

/// A single top-level workspace field change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceUpdate {
    /// `x-scalar-default-client`
    DefaultClient(ClientId),
    /// `x-scalar-dark-mode`
    DarkMode(bool),
    /// `proxyUrl`
    ProxyUrl(Option<String>),
    /// `name`
    Name(String),
}

impl WorkspaceUpdate {
    /// The serialized key of the updated field.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::DefaultClient(_) => "x-scalar-default-client",
            Self::DarkMode(_) => "x-scalar-dark-mode",
            Self::ProxyUrl(_) => "proxyUrl",
            Self::Name(_) => "name",
        }
    }
}

impl Workspace {
    /// Creates an empty workspace.
    #[must_use]
    pub fn new(uid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            proxy_url: None,
            default_client: None,
            dark_mode: false,
            active_document: None,
            documents: BTreeMap::new(),
            requests: Vec::new(),
        }
    }

    /// The workspace used when nothing was persisted.
    #[must_use]
    pub fn default_workspace() -> Self {
        Self::new(DEFAULT_WORKSPACE_UID, DEFAULT_WORKSPACE_NAME)
    }

    /// Applies a top-level field change.
    pub fn apply(&mut self, update: WorkspaceUpdate) {
        match update {
            WorkspaceUpdate::DefaultClient(client) => self.default_client = Some(client),
            WorkspaceUpdate::DarkMode(dark) => self.dark_mode = dark,
            WorkspaceUpdate::ProxyUrl(url) => self.proxy_url = url,
            WorkspaceUpdate::Name(name) => self.name = name,
        }
    }

    /// The active document, if one is selected and present.
    #[must_use]
    pub fn active_document(&self) -> Option<&WorkspaceDocument> {
        self.active_document
            .as_ref()
            .and_then(|name| self.documents.get(name))
    }

    /// First request answering `path` and `method`.
    ///
    /// Duplicate registrations resolve to the earliest one.
    #[must_use]
    pub fn find_request(&self, path: &str, method: HttpMethod) -> Option<&RequestDefinition> {
        self.requests
            .iter()
            .find(|request| request.matches(path, method))
    }

    /// The request carrying `operation_id`.
    pub fn request_by_operation_id_mut(
        &mut self,
        operation_id: &str,
    ) -> Option<&mut RequestDefinition> {
        self.requests
            .iter_mut()
            .find(|request| request.operation_id.as_deref() == Some(operation_id))
    }

    /// The request with `uid`.
    pub fn request_mut(&mut self, uid: &str) -> Option<&mut RequestDefinition> {
        self.requests.iter_mut().find(|request| request.uid == uid)
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::default_workspace()
    }
}
