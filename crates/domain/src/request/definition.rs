//! Request definitions held in the workspace store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::HttpMethod;
use crate::id::generate_id;

/// Key of the example every request starts with.
pub const DEFAULT_EXAMPLE: &str = "default";

/// A single operation of a document, addressable by `(path, method)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDefinition {
    /// Unique identifier.
    pub uid: String,
    /// Name of the document the request belongs to.
    pub document: String,
    /// Path template, e.g. `/pets/{petId}`.
    pub path: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Short human readable summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// `operationId` from the document, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Named request examples.
    #[serde(default)]
    pub examples: BTreeMap<String, RequestExample>,
    /// Key of the example currently selected in the client.
    #[serde(default = "default_example_key")]
    pub active_example: String,
}

/// A saved set of parameter and body values for a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestExample {
    /// Display name.
    pub name: String,
    /// Example body, as stored in the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

fn default_example_key() -> String {
    DEFAULT_EXAMPLE.to_string()
}

impl RequestDefinition {
    /// Creates a request with a single default example.
    #[must_use]
    pub fn new(document: impl Into<String>, path: impl Into<String>, method: HttpMethod) -> Self {
        let mut examples = BTreeMap::new();
        examples.insert(
            DEFAULT_EXAMPLE.to_string(),
            RequestExample {
                name: "Default".to_string(),
                body: None,
            },
        );
        Self {
            uid: generate_id(),
            document: document.into(),
            path: path.into(),
            method,
            summary: None,
            operation_id: None,
            examples,
            active_example: default_example_key(),
        }
    }

    /// Sets the operation id.
    #[must_use]
    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    /// Sets the summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Returns true when this request answers `path` and `method`.
    ///
    /// Paths are compared after [`normalize_path`].
    #[must_use]
    pub fn matches(&self, path: &str, method: HttpMethod) -> bool {
        self.method == method && normalize_path(&self.path) == normalize_path(path)
    }
}

/// Normalizes a request path for comparison.
///
/// Trims whitespace, guarantees a leading `/` and drops a trailing `/`
/// unless the path is the root.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    let mut normalized = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };
    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_adds_leading_and_strips_trailing_slash() {
        assert_eq!(normalize_path("pets/"), "/pets");
        assert_eq!(normalize_path(" /pets "), "/pets");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn matches_ignores_trailing_slash() {
        let request = RequestDefinition::new("api", "/pets", HttpMethod::Get);
        assert!(request.matches("/pets/", HttpMethod::Get));
        assert!(!request.matches("/pets", HttpMethod::Post));
        assert!(!request.matches("/pets/1", HttpMethod::Get));
    }

    #[test]
    fn new_request_has_default_example() {
        let request = RequestDefinition::new("api", "/pets", HttpMethod::Get);
        assert_eq!(request.active_example, DEFAULT_EXAMPLE);
        assert!(request.examples.contains_key(DEFAULT_EXAMPLE));
    }
}
