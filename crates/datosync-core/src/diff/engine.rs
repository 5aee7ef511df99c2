//! Pairing and comparison of canonical models and fields.

use crate::diff::lines::structural_delta;
use crate::diff::model::{FieldDiff, ModelDiff};
use crate::model::{CanonicalField, CanonicalModel, CanonicalModels};
use indexmap::IndexMap;

/// Pair two keyed maps: every key of `a` in order, then the keys only in `b`
/// in `b`'s order.
fn pair_by_key<'a, V>(
    a: &'a IndexMap<String, V>,
    b: &'a IndexMap<String, V>,
) -> Vec<(Option<&'a V>, Option<&'a V>)> {
    let mut pairs: Vec<(Option<&V>, Option<&V>)> =
        a.iter().map(|(key, va)| (Some(va), b.get(key))).collect();
    pairs.extend(
        b.iter()
            .filter(|(key, _)| !a.contains_key(*key))
            .map(|(_, vb)| (None, Some(vb))),
    );
    pairs
}

/// Compare two canonical model sets.
///
/// One entry per apiKey in either set: A's models first, then models only in B.
pub fn diff_models(a: &CanonicalModels, b: &CanonicalModels) -> Vec<ModelDiff> {
    pair_by_key(a, b)
        .into_iter()
        .map(|(ma, mb)| diff_model(ma, mb))
        .collect()
}

/// Compare one model across both sides.
///
/// At least one side is expected to be present. If both are absent the
/// result is an empty, equal diff.
pub fn diff_model(a: Option<&CanonicalModel>, b: Option<&CanonicalModel>) -> ModelDiff {
    let empty = IndexMap::new();
    let fields_a = a.map(|m| &m.fields).unwrap_or(&empty);
    let fields_b = b.map(|m| &m.fields).unwrap_or(&empty);

    let fields: Vec<FieldDiff> = pair_by_key(fields_a, fields_b)
        .into_iter()
        .map(|(fa, fb)| diff_field(fa, fb))
        .collect();

    let record_a = a.map(CanonicalModel::record);
    let record_b = b.map(CanonicalModel::record);
    let attributes_equal = record_a == record_b;
    let equal = attributes_equal && fields.iter().all(|f| f.equal);

    let api_key = a
        .or(b)
        .map(|m| m.api_key.clone())
        .unwrap_or_default();
    let label = a
        .and_then(CanonicalModel::name)
        .or_else(|| b.and_then(CanonicalModel::name))
        .map(str::to_string)
        .unwrap_or_else(|| api_key.clone());

    ModelDiff {
        delta: structural_delta(record_a.as_ref(), record_b.as_ref()),
        api_key,
        label,
        equal,
        attributes_equal,
        fields,
    }
}

/// Compare one field across both sides.
pub fn diff_field(a: Option<&CanonicalField>, b: Option<&CanonicalField>) -> FieldDiff {
    let record_a = a.map(CanonicalField::record);
    let record_b = b.map(CanonicalField::record);

    let api_key = a
        .or(b)
        .map(|f| f.api_key.clone())
        .unwrap_or_default();
    let label = a
        .and_then(CanonicalField::label)
        .or_else(|| b.and_then(CanonicalField::label))
        .map(str::to_string)
        .unwrap_or_else(|| api_key.clone());

    FieldDiff {
        equal: record_a == record_b,
        delta: structural_delta(record_a.as_ref(), record_b.as_ref()),
        api_key,
        label,
    }
}

/// Total number of field comparisons across all model diffs
pub fn total_fields(diffs: &[ModelDiff]) -> usize {
    diffs.iter().map(|d| d.fields.len()).sum()
}
