//! Error handling for datosync-store
//!
//! Wraps datosync-core ExError with store-specific helpers

use datosync_core::errors::{ExError, ExErrorKind};
use serde_json::json;
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
///
/// The raw OS error is attached as details so diagnostics can print it as-is.
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    let path = path.display().to_string();
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_entity_key(path.clone())
        .with_details(json!({
            "op": operation,
            "kind": format!("{:?}", err.kind()),
            "errno": err.raw_os_error(),
            "path": path,
            "message": err.to_string(),
        }))
        .with_message(err.to_string())
}

/// Create an invalid snapshot error
pub fn snapshot_error(path: &Path, reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidSnapshot)
        .with_op("read_snapshot")
        .with_entity_key(path.display().to_string())
        .with_message(reason.to_string())
}
