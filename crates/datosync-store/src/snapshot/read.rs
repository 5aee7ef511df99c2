#![allow(clippy::result_large_err)]

use crate::errors::{io_error, snapshot_error, Result};
use datosync_core::RawModel;
use std::fs;
use std::path::Path;

/// Read and parse a snapshot file
///
/// # Errors
///
/// - `Io` when the file cannot be read
/// - `InvalidSnapshot` when it is not UTF-8 or not a JSON array of models
pub fn read_snapshot(path: &Path) -> Result<Vec<RawModel>> {
    let bytes = fs::read(path).map_err(|e| io_error("read_snapshot", path, e))?;
    let models = parse_snapshot(path, &bytes)?;

    tracing::debug!(
        path = %path.display(),
        models_len = models.len(),
        "Read snapshot file"
    );

    Ok(models)
}

/// Parse snapshot bytes; `path` is only used for error context
///
/// # Errors
///
/// `InvalidSnapshot` when the bytes are not UTF-8 or not a JSON array of models
pub fn parse_snapshot(path: &Path, bytes: &[u8]) -> Result<Vec<RawModel>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| snapshot_error(path, &format!("snapshot is not valid UTF-8: {}", e)))?;

    serde_json::from_str(text)
        .map_err(|e| snapshot_error(path, &format!("snapshot is not a model array: {}", e)))
}
