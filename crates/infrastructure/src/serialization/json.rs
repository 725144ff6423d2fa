//! Deterministic JSON output and JSON/YAML input.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The text is neither JSON nor YAML.
    #[error("not valid JSON or YAML: {0}")]
    Structured(String),

    /// Serialized output was not UTF-8.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value as 2-space indented JSON with a trailing newline.
///
/// Map keys come out in the order of the source type, so `BTreeMap`s give
/// stable files.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"  "));
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Parses JSON, falling back to YAML.
///
/// Text that starts with `{` or `[` is only tried as JSON so that syntax
/// errors report the JSON position.
///
/// # Errors
///
/// Returns an error if the text parses as neither.
pub fn parse_structured(text: &str) -> Result<Value, SerializationError> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return serde_json::from_str(text).map_err(SerializationError::from);
    }
    serde_yaml::from_str::<Value>(text).map_err(|e| SerializationError::Structured(e.to_string()))
}
