#![allow(clippy::result_large_err)]

use crate::atomic::atomic_write;
use crate::errors::Result;
use datosync_core::errors::{ExError, ExErrorKind};
use datosync_core::RawModel;
use std::path::Path;

/// Render models as 2-space pretty JSON
///
/// # Errors
///
/// `Serialization` if a model cannot be encoded
pub fn render_snapshot(models: &[RawModel]) -> Result<String> {
    serde_json::to_string_pretty(models).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("render_snapshot")
            .with_message(format!("Failed to serialize snapshot: {}", e))
    })
}

/// Write models to `path` as a snapshot file, replacing any existing file
///
/// # Errors
///
/// - `Serialization` if a model cannot be encoded
/// - `Io` if the file cannot be written
pub fn write_snapshot(path: &Path, models: &[RawModel]) -> Result<()> {
    let json = render_snapshot(models)?;
    atomic_write(path, json.as_bytes())?;

    tracing::debug!(
        path = %path.display(),
        size_bytes = json.len(),
        "Wrote snapshot file"
    );

    Ok(())
}
