//! Snapshot fixtures shared by the integration tests.
//!
//! `model_a` has three fields, `model_b` has one. Both use the raw (camelCase)
//! shape a pulled snapshot file contains.

#![allow(dead_code)]

use datosync_core::{diff_models, normalize, ModelDiff, RawModel};
use serde_json::{json, Value};

fn text_field(id: &str, label: &str, api_key: &str, position: u32, item_type: &str) -> Value {
    json!({
        "id": id,
        "label": label,
        "fieldType": "string",
        "apiKey": api_key,
        "hint": null,
        "localized": false,
        "validators": {},
        "position": position,
        "appeareance": {
            "editor": "single_line",
            "parameters": {"heading": false},
            "addons": []
        },
        "defaultValue": null,
        "itemType": item_type
    })
}

pub fn model_a() -> Value {
    let mut field_one = text_field("289805", "Field One", "field_one", 1, "72969");
    field_one["validators"] = json!({"required": {}});
    json!({
        "id": "72969",
        "name": "Model A",
        "singleton": false,
        "sortable": false,
        "apiKey": "model_a",
        "orderingDirection": null,
        "tree": false,
        "modularBlock": false,
        "draftModeActive": false,
        "allLocalesRequired": true,
        "collectionAppeareance": "table",
        "hasSingletonItem": false,
        "singletonItem": null,
        "fields": [
            field_one,
            text_field("289806", "Field Two", "field_two", 2, "72969"),
            text_field("289807", "Field Three", "field_three", 3, "72969")
        ],
        "titleField": "289805",
        "orderingField": null
    })
}

pub fn model_b() -> Value {
    let mut field_one = text_field("282158", "Field One", "field_one", 1, "71444");
    field_one["validators"] = json!({"required": {}});
    field_one["localized"] = json!(true);
    json!({
        "id": "71444",
        "name": "Model B",
        "singleton": false,
        "sortable": false,
        "apiKey": "model_b",
        "orderingDirection": null,
        "tree": false,
        "modularBlock": false,
        "draftModeActive": false,
        "allLocalesRequired": true,
        "collectionAppeareance": "table",
        "hasSingletonItem": false,
        "singletonItem": null,
        "fields": [field_one],
        "titleField": "282158",
        "orderingField": null
    })
}

/// Index of `field_three` within `model_a`'s fields
pub const FIELD_THREE: usize = 2;

pub fn parse(models: Vec<Value>) -> Vec<RawModel> {
    serde_json::from_value(Value::Array(models)).expect("fixture should parse")
}

/// Normalize both sides and diff them
pub fn diff(src: Vec<Value>, dest: Vec<Value>) -> Vec<ModelDiff> {
    let a = normalize(&parse(src)).expect("src should normalize");
    let b = normalize(&parse(dest)).expect("dest should normalize");
    diff_models(&a, &b)
}
