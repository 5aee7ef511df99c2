//! Diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.

use serde::{Deserialize, Serialize};

/// Classification of one run of delta lines
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChunkTag {
    Unchanged,
    Added,
    Removed,
}

/// A run of consecutive lines sharing one tag.
///
/// `value` holds the lines joined with `\n`, without a trailing newline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    pub tag: ChunkTag,
    pub value: String,
}

impl Chunk {
    pub fn new(tag: ChunkTag, value: impl Into<String>) -> Self {
        Self {
            tag,
            value: value.into(),
        }
    }

    pub fn is_change(&self) -> bool {
        self.tag != ChunkTag::Unchanged
    }
}

/// Comparison of one model present in A, in B, or in both
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelDiff {
    pub api_key: String,
    /// Model name from A, else from B, else the apiKey
    pub label: String,
    /// Model attributes and every field are equal
    pub equal: bool,
    /// Model record without fields is equal
    pub attributes_equal: bool,
    /// Delta of the model record without fields
    pub delta: Vec<Chunk>,
    /// Field comparisons, A's fields first then fields only in B
    pub fields: Vec<FieldDiff>,
}

/// Comparison of one field present in A, in B, or in both
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDiff {
    pub api_key: String,
    /// Field label from A, else from B, else the apiKey
    pub label: String,
    pub equal: bool,
    /// Delta of the full field record
    pub delta: Vec<Chunk>,
}

impl ModelDiff {
    /// Fields whose records differ
    pub fn unequal_fields(&self) -> impl Iterator<Item = &FieldDiff> {
        self.fields.iter().filter(|f| !f.equal)
    }
}
