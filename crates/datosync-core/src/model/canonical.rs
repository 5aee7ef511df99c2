//! Canonical (normalized) records.
//!
//! A canonical record holds no environment-specific ids. Cross references
//! point at apiKeys, so two snapshots of the same schema taken from different
//! environments produce equal records.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Normalized models keyed by apiKey, in input order
pub type CanonicalModels = IndexMap<String, CanonicalModel>;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalModel {
    pub api_key: String,
    /// apiKey of the title field
    pub title_field: Option<String>,
    /// apiKey of the ordering field
    pub ordering_field: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
    /// Fields keyed by apiKey, in input order. Not part of the model record.
    #[serde(skip)]
    pub fields: IndexMap<String, CanonicalField>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalField {
    pub api_key: String,
    /// apiKey of the owning model
    pub item_type: String,
    /// Validators with `itemTypes` rewritten to sorted apiKeys
    pub validators: Map<String, Value>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl CanonicalModel {
    /// The model record without its fields, as a JSON object
    pub fn record(&self) -> Value {
        to_record(self)
    }

    pub fn name(&self) -> Option<&str> {
        self.attributes.get("name").and_then(Value::as_str)
    }
}

impl CanonicalField {
    /// The full field record as a JSON object
    pub fn record(&self) -> Value {
        to_record(self)
    }

    pub fn label(&self) -> Option<&str> {
        self.attributes.get("label").and_then(Value::as_str)
    }
}

// Records hold only strings and JSON values, so serialization cannot fail.
fn to_record<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|_| Value::Object(Map::new()))
}
