//! Security scheme helpers.

use serde_json::{Map, Value};

/// Merges `incoming` over `existing`, one level deep.
///
/// Keys present in `incoming` override, other keys of `existing` are kept.
/// When either side is not an object, `incoming` wins as a whole.
#[must_use]
pub fn merge_objects(existing: &Value, incoming: &Value) -> Value {
    match (existing, incoming) {
        (Value::Object(base), Value::Object(overlay)) => {
            let mut merged = base.clone();
            for (key, value) in overlay {
                merged.insert(key.clone(), value.clone());
            }
            Value::Object(merged)
        }
        _ => incoming.clone(),
    }
}

/// Shorthand secret fields accepted in configuration and the stored
/// extension they map to.
const SECRET_FIELDS: &[(&str, &str)] = &[
    ("token", "x-scalar-secret-token"),
    ("value", "x-scalar-secret-token"),
    ("username", "x-scalar-secret-username"),
    ("password", "x-scalar-secret-password"),
    ("clientId", "x-scalar-client-id"),
    ("clientSecret", "x-scalar-client-secret"),
];

/// Converts configuration shorthand into the stored scheme shape.
///
/// `{ "type": "http", "token": "t" }` becomes
/// `{ "type": "http", "x-scalar-secret-token": "t" }`. Values that are not
/// objects are returned unchanged.
#[must_use]
pub fn convert_security_scheme(scheme: &Value) -> Value {
    let Value::Object(fields) = scheme else {
        return scheme.clone();
    };
    let mut converted = Map::with_capacity(fields.len());
    for (key, value) in fields {
        let target = SECRET_FIELDS
            .iter()
            .find(|(short, _)| *short == key.as_str())
            .map_or(key.as_str(), |(_, long)| long);
        converted.insert(target.to_string(), value.clone());
    }
    Value::Object(converted)
}
