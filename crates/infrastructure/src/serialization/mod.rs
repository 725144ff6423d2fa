//! Serialization helpers shared by the adapters.

mod json;

pub use json::{SerializationError, parse_structured, to_json_stable};
