//! Document importers.

mod openapi;

pub use openapi::OpenApiImporter;
