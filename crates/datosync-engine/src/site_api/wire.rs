//! JSON:API documents and their conversion to raw records.
//!
//! Resources arrive with snake_case attribute names and ids hidden in
//! `relationships`. Conversion flattens both into one camelCase record, the
//! shape snapshot files use.

use serde::Deserialize;
use serde_json::{Map, Value};

/// `{ "data": [resource, ...] }`
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub data: Vec<Resource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default)]
    pub relationships: Map<String, Value>,
}

/// Error document returned with non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDocument {
    pub data: Vec<ErrorResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResource {
    #[serde(default)]
    pub attributes: ErrorAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorAttributes {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Value,
}

/// `snake_case` to `camelCase`
pub fn camelize(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for (i, c) in key.chars().enumerate() {
        if c == '_' && i > 0 {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Camelize every object key, at any depth
pub fn camelize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (camelize(&k), camelize_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(camelize_keys).collect()),
        other => other,
    }
}

/// Relationship linkage to plain ids: one id, a list of ids, or null
fn linkage_ids(relationship: &Value) -> Value {
    match relationship.get("data") {
        Some(Value::Object(link)) => link.get("id").cloned().unwrap_or(Value::Null),
        Some(Value::Array(links)) => Value::Array(
            links
                .iter()
                .filter_map(|link| link.get("id").cloned())
                .collect(),
        ),
        _ => Value::Null,
    }
}

/// Flatten a resource into a camelCase record with `id` first
pub fn resource_to_record(resource: Resource) -> Map<String, Value> {
    let mut record = Map::new();
    record.insert("id".to_string(), Value::String(resource.id));
    for (key, value) in resource.attributes {
        record.insert(camelize(&key), camelize_keys(value));
    }
    for (key, relationship) in &resource.relationships {
        record.insert(camelize(key), linkage_ids(relationship));
    }
    record
}

/// Build a model record with its fetched fields embedded under `fields`
pub fn model_record(model: Resource, fields: Vec<Resource>) -> Value {
    let mut record = resource_to_record(model);
    record.insert(
        "fields".to_string(),
        Value::Array(
            fields
                .into_iter()
                .map(|f| Value::Object(resource_to_record(f)))
                .collect(),
        ),
    );
    Value::Object(record)
}

/// `"<status> <CODE> (details: <json>)"` from an error body, or the raw body
pub fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorDocument>(body) {
        Ok(doc) if !doc.data.is_empty() => doc
            .data
            .iter()
            .map(|e| {
                let details = if e.attributes.details.is_null() {
                    "{}".to_string()
                } else {
                    e.attributes.details.to_string()
                };
                format!(
                    "{} {} (details: {})",
                    status,
                    e.attributes.code.as_deref().unwrap_or("UNKNOWN"),
                    details
                )
            })
            .collect::<Vec<_>>()
            .join(", "),
        _ if body.trim().is_empty() => status.to_string(),
        _ => format!("{} {}", status, body.trim()),
    }
}
