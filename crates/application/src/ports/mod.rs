//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod document;
mod mount;
mod page;
mod storage;

pub use document::{DocumentError, DocumentFetcher, DocumentImporter, ImportedDocument};
pub use mount::MountTarget;
pub use page::{FaviconSink, PageSinks, SeoMetaSink};
pub use storage::{KeyValueStorage, StorageError};
