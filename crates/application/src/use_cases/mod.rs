//! Use case implementations

mod load_document;
mod resolve_store;

pub use load_document::LoadDocument;
pub use resolve_store::{ResolveStore, ResolveStoreInput, StoreOrigin};
