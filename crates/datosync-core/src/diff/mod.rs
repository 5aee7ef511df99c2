//! Structural diff of two canonical model sets.
//!
//! Models and fields are paired by apiKey only. For every pair the engine
//! reports deep equality and a line-level delta of the canonical JSON of both
//! sides.
//!
//! ## Entry point
//!
//! ```
//! use datosync_core::diff::diff_models;
//! use datosync_core::model::CanonicalModels;
//!
//! let a = CanonicalModels::new();
//! let b = CanonicalModels::new();
//! assert!(diff_models(&a, &b).is_empty());
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: equal inputs produce equal diffs, in the same order.
//! - **Key-only identity**: an apiKey rename is reported as one entry only in
//!   A plus one entry only in B.
//! - **Id insensitivity**: canonical records carry no environment ids, so id
//!   churn never shows up as a difference.

pub mod engine;
pub mod lines;
pub mod model;

pub use engine::{diff_field, diff_model, diff_models, total_fields};
pub use lines::{canonical_json, diff_lines, structural_delta};
pub use model::{Chunk, ChunkTag, FieldDiff, ModelDiff};
