//! DatoSync Core - schema normalization and structural diff
//!
//! This crate provides the pure part of datosync:
//! - Raw and canonical model/field records
//! - Normalization that erases environment-specific ids
//! - apiKey-based pairing with deep equality and line-level deltas
//! - Terminal report rendering
//! - Error and logging facilities shared by the other crates
//!
//! Nothing here performs I/O. Fetching and persisting snapshots live in
//! `datosync-engine` and `datosync-store`.

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod normalize;
pub mod report;

pub use datosync_core_types as core_types;

// Re-export commonly used types
pub use diff::{diff_models, FieldDiff, ModelDiff};
pub use errors::{DatoSyncError, ExError, ExErrorKind, Result};
pub use model::{CanonicalField, CanonicalModel, CanonicalModels, RawField, RawModel};
pub use normalize::normalize;
pub use report::ColorMode;
