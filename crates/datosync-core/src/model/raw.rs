//! Raw model and field records.
//!
//! Only the attributes normalization touches are typed. Everything else is
//! carried verbatim in `attributes` so a pulled snapshot can be written back
//! out without losing data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A model as exported by the remote API, with its fields embedded
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawModel {
    /// Environment-specific id
    pub id: String,
    /// Durable identity
    pub api_key: String,
    /// Raw id of the field used as record title
    #[serde(default)]
    pub title_field: Option<String>,
    /// Raw id of the field records are ordered by
    #[serde(default)]
    pub ordering_field: Option<String>,
    /// Raw id of the singleton record, if any
    #[serde(default)]
    pub singleton_item: Option<String>,
    #[serde(default)]
    pub fields: Vec<RawField>,
    /// Pass-through attributes (`name`, `sortable`, `tree`, ...)
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// A field as exported by the remote API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawField {
    /// Environment-specific id
    pub id: String,
    pub api_key: String,
    /// Raw id of the owning model
    #[serde(default)]
    pub item_type: Option<String>,
    /// Validator name to validator config
    #[serde(default)]
    pub validators: Map<String, Value>,
    /// Pass-through attributes (`label`, `fieldType`, `position`, ...)
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl RawModel {
    /// Display name of the model, if it carries one
    pub fn name(&self) -> Option<&str> {
        self.attributes.get("name").and_then(Value::as_str)
    }

    /// Look up one of this model's fields by raw id
    pub fn field_by_id(&self, id: &str) -> Option<&RawField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

/// Total number of fields across a model list
pub fn count_fields(models: &[RawModel]) -> usize {
    models.iter().map(|m| m.fields.len()).sum()
}
