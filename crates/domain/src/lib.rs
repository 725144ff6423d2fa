//! Meridian Domain - Core business types
//!
//! This crate defines the domain model for the Meridian API client:
//! workspaces, documents, request definitions, client configuration and
//! the local storage layout. All types here are pure Rust with no I/O.

pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod id;
pub mod persistence;
pub mod request;
pub mod security;
pub mod workspace;

pub use client::{AVAILABLE_CLIENTS, ClientId, is_client};
pub use config::{
    AuthenticationConfig, ClientConfiguration, ConfigField, DefaultHttpClient, MetaData,
};
pub use document::{ACTIVE_AUTH_KEY, DocumentPath, WorkspaceDocument};
pub use error::{DomainError, DomainResult};
pub use id::generate_id;
pub use persistence::{DATA_VERSION, PersistedWorkspaces, StorageKey};
pub use request::{DEFAULT_EXAMPLE, HttpMethod, RequestDefinition, RequestExample, normalize_path};
pub use security::{convert_security_scheme, merge_objects};
pub use workspace::{
    DEFAULT_WORKSPACE_NAME, DEFAULT_WORKSPACE_UID, Workspace, WorkspaceUpdate, validate_proxy_url,
};
