//! Meridian Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod import;
pub mod persistence;
pub mod serialization;

pub use adapters::{ReqwestDocumentFetcher, TracingPageSink};
pub use import::OpenApiImporter;
pub use persistence::{FileKeyValueStorage, MemoryKeyValueStorage};
pub use serialization::{SerializationError, parse_structured, to_json_stable};
