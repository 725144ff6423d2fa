//! Request types

mod definition;
mod method;

pub use definition::{DEFAULT_EXAMPLE, RequestDefinition, RequestExample, normalize_path};
pub use method::HttpMethod;
