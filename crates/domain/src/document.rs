//! API documents held by a workspace.
//!
//! A document is kept as a JSON tree so that configuration can address any
//! part of it by a dotted path such as `components.securitySchemes.apiKey`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};

/// Document extension naming the selected security scheme.
pub const ACTIVE_AUTH_KEY: &str = "x-scalar-active-auth";

/// A path into a document, stored as segments.
///
/// Segments may contain dots (scheme names are allowed to), so callers that
/// know the structure should build paths with the constructors rather than
/// by formatting strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath(Vec<String>);

impl DocumentPath {
    /// Parses a dotted path.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPath`] for empty paths or empty segments.
    pub fn parse(path: &str) -> DomainResult<Self> {
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(DomainError::InvalidPath(path.to_string()));
        }
        Ok(Self(segments))
    }

    /// `components.securitySchemes.<name>`
    #[must_use]
    pub fn security_scheme(name: &str) -> Self {
        Self(vec![
            "components".to_string(),
            "securitySchemes".to_string(),
            name.to_string(),
        ])
    }

    /// `x-scalar-active-auth`
    #[must_use]
    pub fn active_auth() -> Self {
        Self(vec![ACTIVE_AUTH_KEY.to_string()])
    }

    /// The path segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// A structured API document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceDocument(Value);

impl Default for WorkspaceDocument {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl WorkspaceDocument {
    /// Wraps a JSON tree.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotAnObject`] when the root is not an object.
    pub fn new(root: Value) -> DomainResult<Self> {
        if root.is_object() {
            Ok(Self(root))
        } else {
            Err(DomainError::NotAnObject {
                path: String::new(),
                segment: String::new(),
            })
        }
    }

    /// `info.title`, if present.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.0.pointer("/info/title").and_then(Value::as_str)
    }

    /// Reads the value at `path`.
    #[must_use]
    pub fn get(&self, path: &DocumentPath) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(&self.0, |node, segment| node.get(segment))
    }

    /// Writes `value` at `path`, creating missing intermediate objects.
    ///
    /// The previous value at `path` is replaced as a whole.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotAnObject`] when an existing intermediate
    /// value is not an object.
    pub fn set(&mut self, path: &DocumentPath, value: Value) -> DomainResult<()> {
        let Some((last, parents)) = path.segments().split_last() else {
            return Err(DomainError::InvalidPath(String::new()));
        };
        let mut node = &mut self.0;
        for segment in parents {
            let Value::Object(map) = node else {
                return Err(not_an_object(path, segment));
            };
            node = map
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        let Value::Object(map) = node else {
            return Err(not_an_object(path, last));
        };
        map.insert(last.clone(), value);
        Ok(())
    }

    /// The stored security scheme called `name`.
    #[must_use]
    pub fn security_scheme(&self, name: &str) -> Option<&Value> {
        self.get(&DocumentPath::security_scheme(name))
    }

    /// Name of the selected security scheme.
    #[must_use]
    pub fn active_auth(&self) -> Option<&str> {
        self.0.get(ACTIVE_AUTH_KEY).and_then(Value::as_str)
    }

    /// The underlying JSON tree.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }
}

fn not_an_object(path: &DocumentPath, segment: &str) -> DomainError {
    DomainError::NotAnObject {
        path: path.to_string(),
        segment: segment.to_string(),
    }
}
