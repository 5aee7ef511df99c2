//! Raw records to canonical form.
//!
//! Environment-specific ids never survive normalization. `id` and
//! `singletonItem` are dropped, `itemType` becomes the owning model's apiKey,
//! and `titleField`, `orderingField` and validator `itemTypes` are rewritten
//! to apiKey references.

use crate::errors::{DatoSyncError, Result};
use crate::model::{CanonicalField, CanonicalModel, CanonicalModels, RawField, RawModel};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;

const ITEM_TYPES: &str = "itemTypes";

/// Normalize a raw model list into canonical models keyed by apiKey.
///
/// Runs two passes over the (unmodified) input. The first indexes every model
/// by raw id, the second rewrites each model against that index. Output order
/// is input order.
///
/// # Errors
///
/// - `DuplicateModelKey` / `DuplicateFieldKey` when an apiKey repeats
/// - `TitleFieldNotFound` / `OrderingFieldNotFound` when a model references a
///   field id it does not own
/// - `UnknownItemType` when a validator references a model id absent from
///   the input
/// - `MalformedItemTypes` when a validator's `itemTypes` is not a list of ids
pub fn normalize(raw: &[RawModel]) -> Result<CanonicalModels> {
    // Pass 1: raw model id -> apiKey
    let mut keys_by_id: HashMap<&str, &str> = HashMap::with_capacity(raw.len());
    for model in raw {
        keys_by_id.insert(model.id.as_str(), model.api_key.as_str());
    }

    // Pass 2: rewrite
    let mut models = CanonicalModels::with_capacity(raw.len());
    for model in raw {
        let canonical = normalize_model(model, &keys_by_id)?;
        if models.contains_key(&canonical.api_key) {
            return Err(DatoSyncError::DuplicateModelKey {
                model: canonical.api_key,
            });
        }
        models.insert(canonical.api_key.clone(), canonical);
    }

    Ok(models)
}

fn normalize_model(model: &RawModel, keys_by_id: &HashMap<&str, &str>) -> Result<CanonicalModel> {
    let title_field = match model.title_field.as_deref() {
        Some(id) => Some(
            model
                .field_by_id(id)
                .map(|f| f.api_key.clone())
                .ok_or_else(|| DatoSyncError::TitleFieldNotFound {
                    model: model.api_key.clone(),
                    field_id: id.to_string(),
                })?,
        ),
        None => None,
    };

    let ordering_field = match model.ordering_field.as_deref() {
        Some(id) => Some(
            model
                .field_by_id(id)
                .map(|f| f.api_key.clone())
                .ok_or_else(|| DatoSyncError::OrderingFieldNotFound {
                    model: model.api_key.clone(),
                    field_id: id.to_string(),
                })?,
        ),
        None => None,
    };

    let mut fields = IndexMap::with_capacity(model.fields.len());
    for field in &model.fields {
        let canonical = normalize_field(&model.api_key, field, keys_by_id)?;
        if fields.contains_key(&canonical.api_key) {
            return Err(DatoSyncError::DuplicateFieldKey {
                model: model.api_key.clone(),
                field: canonical.api_key,
            });
        }
        fields.insert(canonical.api_key.clone(), canonical);
    }

    Ok(CanonicalModel {
        api_key: model.api_key.clone(),
        title_field,
        ordering_field,
        attributes: model.attributes.clone(),
        fields,
    })
}

fn normalize_field(
    model_key: &str,
    field: &RawField,
    keys_by_id: &HashMap<&str, &str>,
) -> Result<CanonicalField> {
    let mut validators = Map::with_capacity(field.validators.len());
    for (name, config) in &field.validators {
        let config = match config {
            Value::Object(obj) if obj.contains_key(ITEM_TYPES) => {
                let mut obj = obj.clone();
                let ids = obj.get(ITEM_TYPES).cloned().unwrap_or(Value::Null);
                let keys = resolve_item_types(model_key, &field.api_key, name, &ids, keys_by_id)?;
                obj.insert(
                    ITEM_TYPES.to_string(),
                    Value::Array(keys.into_iter().map(Value::String).collect()),
                );
                Value::Object(obj)
            }
            other => other.clone(),
        };
        validators.insert(name.clone(), config);
    }

    Ok(CanonicalField {
        api_key: field.api_key.clone(),
        item_type: model_key.to_string(),
        validators,
        attributes: field.attributes.clone(),
    })
}

fn resolve_item_types(
    model_key: &str,
    field_key: &str,
    validator: &str,
    ids: &Value,
    keys_by_id: &HashMap<&str, &str>,
) -> Result<Vec<String>> {
    let malformed = || DatoSyncError::MalformedItemTypes {
        model: model_key.to_string(),
        field: field_key.to_string(),
        validator: validator.to_string(),
    };

    let ids = ids.as_array().ok_or_else(malformed)?;
    let mut keys = Vec::with_capacity(ids.len());
    for id in ids {
        let id = id.as_str().ok_or_else(malformed)?;
        let key = keys_by_id
            .get(id)
            .ok_or_else(|| DatoSyncError::UnknownItemType {
                model: model_key.to_string(),
                field: field_key.to_string(),
                validator: validator.to_string(),
                item_type_id: id.to_string(),
            })?;
        keys.push((*key).to_string());
    }
    keys.sort_by(|a, b| locale_cmp(a, b));
    Ok(keys)
}

/// Case-aware ordering in the style of a locale collation.
///
/// Characters compare by class first (punctuation, then digits, then letters)
/// and case-insensitively within a class. On a tie lowercase sorts before
/// uppercase.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(collation_key(b))
        .then_with(|| a.chars().map(char::is_uppercase).cmp(b.chars().map(char::is_uppercase)))
        .then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    s.chars().flat_map(char::to_lowercase).map(|c| {
        let class = if c.is_alphabetic() {
            2
        } else if c.is_numeric() {
            1
        } else {
            0
        };
        (class, c)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn raw(value: Value) -> Vec<RawModel> {
        serde_json::from_value(value).unwrap()
    }

    fn linked_models() -> Vec<RawModel> {
        raw(json!([
            {
                "id": "1",
                "apiKey": "article",
                "name": "Article",
                "titleField": "10",
                "orderingField": "11",
                "singletonItem": "999",
                "fields": [
                    {"id": "10", "apiKey": "title", "itemType": "1", "validators": {}},
                    {
                        "id": "11",
                        "apiKey": "related",
                        "itemType": "1",
                        "validators": {"itemItemType": {"itemTypes": ["3", "2"]}}
                    }
                ]
            },
            {"id": "2", "apiKey": "Zebra", "fields": []},
            {"id": "3", "apiKey": "author", "fields": []}
        ]))
    }

    #[test]
    fn test_ids_are_rewritten_to_api_keys() {
        let models = normalize(&linked_models()).unwrap();
        let article = &models["article"];

        assert_eq!(article.title_field.as_deref(), Some("title"));
        assert_eq!(article.ordering_field.as_deref(), Some("related"));
        assert!(!article.record().as_object().unwrap().contains_key("id"));
        assert!(!article.record().as_object().unwrap().contains_key("singletonItem"));

        let related = &article.fields["related"];
        assert_eq!(related.item_type, "article");
        assert_eq!(
            related.validators["itemItemType"]["itemTypes"],
            json!(["author", "Zebra"])
        );
        assert!(!related.record().as_object().unwrap().contains_key("id"));
    }

    #[test]
    fn test_input_order_is_preserved() {
        let models = normalize(&linked_models()).unwrap();
        let keys: Vec<&str> = models.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["article", "Zebra", "author"]);
        let fields: Vec<&str> = models["article"].fields.keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["title", "related"]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let input = linked_models();
        let before = input.clone();
        normalize(&input).unwrap();
        assert_eq!(input, before);
    }

    #[test]
    fn test_unresolvable_title_field_is_fatal() {
        let input = raw(json!([{"id": "1", "apiKey": "m", "titleField": "404", "fields": []}]));
        assert_eq!(
            normalize(&input).unwrap_err(),
            DatoSyncError::TitleFieldNotFound {
                model: "m".into(),
                field_id: "404".into()
            }
        );
    }

    #[test]
    fn test_unresolvable_ordering_field_is_fatal() {
        let input = raw(json!([{"id": "1", "apiKey": "m", "orderingField": "404", "fields": []}]));
        assert!(matches!(
            normalize(&input),
            Err(DatoSyncError::OrderingFieldNotFound { .. })
        ));
    }

    #[test]
    fn test_unknown_item_type_is_fatal() {
        let input = raw(json!([{
            "id": "1",
            "apiKey": "m",
            "fields": [{"id": "10", "apiKey": "link", "validators": {"itemItemType": {"itemTypes": ["77"]}}}]
        }]));
        assert_eq!(
            normalize(&input).unwrap_err(),
            DatoSyncError::UnknownItemType {
                model: "m".into(),
                field: "link".into(),
                validator: "itemItemType".into(),
                item_type_id: "77".into()
            }
        );
    }

    #[test]
    fn test_non_string_item_types_are_malformed() {
        let input = raw(json!([{
            "id": "1",
            "apiKey": "m",
            "fields": [{"id": "10", "apiKey": "link", "validators": {"v": {"itemTypes": [1]}}}]
        }]));
        assert!(matches!(
            normalize(&input),
            Err(DatoSyncError::MalformedItemTypes { .. })
        ));
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        let models = raw(json!([
            {"id": "1", "apiKey": "m", "fields": []},
            {"id": "2", "apiKey": "m", "fields": []}
        ]));
        assert_eq!(
            normalize(&models).unwrap_err(),
            DatoSyncError::DuplicateModelKey { model: "m".into() }
        );

        let fields = raw(json!([{
            "id": "1",
            "apiKey": "m",
            "fields": [{"id": "10", "apiKey": "f"}, {"id": "11", "apiKey": "f"}]
        }]));
        assert_eq!(
            normalize(&fields).unwrap_err(),
            DatoSyncError::DuplicateFieldKey {
                model: "m".into(),
                field: "f".into()
            }
        );
    }

    #[test]
    fn test_locale_cmp() {
        let mut keys = vec!["b", "B", "a", "A", "c"];
        keys.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(keys, vec!["a", "A", "b", "B", "c"]);
    }

    #[test]
    fn test_locale_cmp_orders_punctuation_before_digits_before_letters() {
        let mut keys = vec!["block1", "block_text", "blocka", "item1", "item_a"];
        keys.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(keys, vec!["block_text", "block1", "blocka", "item_a", "item1"]);
    }

    #[test]
    fn test_item_types_with_underscore_sort_before_digits() {
        let input = raw(json!([
            {"id": "1", "apiKey": "block1", "fields": []},
            {"id": "2", "apiKey": "block_text", "fields": []},
            {
                "id": "3",
                "apiKey": "page",
                "fields": [{
                    "id": "30",
                    "apiKey": "body",
                    "validators": {"richTextBlocks": {"itemTypes": ["1", "2"]}}
                }]
            }
        ]));
        let models = normalize(&input).unwrap();
        let body = &models["page"].fields["body"];
        assert_eq!(
            body.validators["richTextBlocks"]["itemTypes"],
            json!(["block_text", "block1"])
        );
    }

    proptest! {
        #[test]
        fn prop_normalize_is_deterministic(ids in proptest::collection::vec("[a-z]{1,6}", 1..8)) {
            let mut seen = std::collections::HashSet::new();
            let models: Vec<Value> = ids
                .iter()
                .enumerate()
                .filter(|(_, key)| seen.insert((*key).clone()))
                .map(|(i, key)| json!({
                    "id": i.to_string(),
                    "apiKey": key,
                    "fields": [{"id": format!("f{}", i), "apiKey": "name", "validators": {}}]
                }))
                .collect();
            let input: Vec<RawModel> = serde_json::from_value(Value::Array(models)).unwrap();

            let first = normalize(&input).unwrap();
            let second = normalize(&input).unwrap();
            prop_assert_eq!(&first, &second);

            let keys: Vec<&String> = first.keys().collect();
            let expected: Vec<&String> = input.iter().map(|m| &m.api_key).collect();
            prop_assert_eq!(keys, expected);
        }

        #[test]
        fn prop_item_types_come_out_sorted(keys in proptest::collection::btree_set("[a-zA-Z]{1,5}", 1..6)) {
            let keys: Vec<String> = keys.into_iter().collect();
            let mut models: Vec<Value> = keys
                .iter()
                .enumerate()
                .map(|(i, key)| json!({"id": i.to_string(), "apiKey": key, "fields": []}))
                .collect();
            let all_ids: Vec<String> = (0..keys.len()).rev().map(|i| i.to_string()).collect();
            models.push(json!({
                "id": "linker",
                "apiKey": "__linker",
                "fields": [{"id": "l", "apiKey": "link", "validators": {"v": {"itemTypes": all_ids}}}]
            }));
            let input: Vec<RawModel> = serde_json::from_value(Value::Array(models)).unwrap();

            let normalized = normalize(&input).unwrap();
            let resolved = normalized["__linker"].fields["link"].validators["v"][ITEM_TYPES]
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_str().unwrap().to_string())
                .collect::<Vec<_>>();
            let mut expected = resolved.clone();
            expected.sort_by(|a, b| locale_cmp(a, b));
            prop_assert_eq!(resolved.len(), keys.len());
            prop_assert_eq!(resolved, expected);
        }
    }
}
