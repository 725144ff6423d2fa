//! OpenAPI document importer.
//!
//! Accepts JSON or YAML and derives one request per path and method. Only
//! the parts the client needs are interpreted; the full tree is kept in the
//! workspace document untouched.

use std::collections::BTreeMap;

use meridian_application::ports::{DocumentError, DocumentImporter, ImportedDocument};
use meridian_domain::{HttpMethod, RequestDefinition, RequestExample, WorkspaceDocument};
use serde_json::{Map, Value};

use crate::serialization::parse_structured;

const FALLBACK_TITLE: &str = "API";

/// Imports OpenAPI 3.x and Swagger 2 style documents.
#[derive(Debug, Clone, Default)]
pub struct OpenApiImporter {
    name: Option<String>,
}

impl OpenApiImporter {
    /// Names documents after their `info.title`.
    #[must_use]
    pub const fn new() -> Self {
        Self { name: None }
    }

    /// Stores every imported document under `name`.
    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

impl DocumentImporter for OpenApiImporter {
    fn import(&self, source: &str) -> Result<ImportedDocument, DocumentError> {
        let root = parse_structured(source).map_err(|e| DocumentError::Parse(e.to_string()))?;
        let document = WorkspaceDocument::new(root).map_err(|_| DocumentError::NotAnObject)?;

        let name = self
            .name
            .clone()
            .or_else(|| document.title().map(str::to_string))
            .unwrap_or_else(|| FALLBACK_TITLE.to_string());

        let requests = document
            .as_value()
            .get("paths")
            .and_then(Value::as_object)
            .map(|paths| collect_requests(&name, paths))
            .unwrap_or_default();

        tracing::debug!(document = %name, requests = requests.len(), "imported document");
        Ok(ImportedDocument {
            name,
            document,
            requests,
        })
    }
}

fn collect_requests(document: &str, paths: &Map<String, Value>) -> Vec<RequestDefinition> {
    let mut requests = Vec::new();
    for (path, item) in paths {
        let Some(item) = item.as_object() else {
            tracing::warn!(path, "skipping path item that is not an object");
            continue;
        };
        // Path items also carry `parameters`, `summary` and friends.
        for (key, operation) in item {
            let Ok(method) = key.parse::<HttpMethod>() else {
                continue;
            };
            requests.push(request_from_operation(document, path, method, operation));
        }
    }
    requests
}

fn request_from_operation(
    document: &str,
    path: &str,
    method: HttpMethod,
    operation: &Value,
) -> RequestDefinition {
    let mut request = RequestDefinition::new(document, path, method);
    if let Some(operation_id) = operation.get("operationId").and_then(Value::as_str) {
        request = request.with_operation_id(operation_id);
    }
    if let Some(summary) = operation.get("summary").and_then(Value::as_str) {
        request = request.with_summary(summary);
    }

    let examples = body_examples(operation);
    if let Some(first) = examples.keys().next() {
        request.active_example = first.clone();
        request.examples = examples;
    }
    request
}

/// Examples of the first media type of `requestBody` that declares any.
fn body_examples(operation: &Value) -> BTreeMap<String, RequestExample> {
    let mut examples = BTreeMap::new();
    let Some(content) = operation
        .pointer("/requestBody/content")
        .and_then(Value::as_object)
    else {
        return examples;
    };

    for media in content.values() {
        if let Some(named) = media.get("examples").and_then(Value::as_object) {
            for (key, example) in named {
                examples.insert(
                    key.clone(),
                    RequestExample {
                        name: example
                            .get("summary")
                            .and_then(Value::as_str)
                            .unwrap_or(key)
                            .to_string(),
                        body: example.get("value").cloned(),
                    },
                );
            }
        } else if let Some(single) = media.get("example") {
            examples.insert(
                meridian_domain::DEFAULT_EXAMPLE.to_string(),
                RequestExample {
                    name: "Default".to_string(),
                    body: Some(single.clone()),
                },
            );
        }
        if !examples.is_empty() {
            break;
        }
    }
    examples
}
