//! `pull`: fetch every model and field and write them to a snapshot file.

#![allow(clippy::result_large_err)]

use crate::fetcher::RecordFetcher;
use datosync_core::errors::ExError;
use datosync_core::{log_op_end, log_op_error, log_op_start};
use datosync_core_types::Sensitive;
use datosync_store::write_snapshot;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default snapshot file name
pub const DEFAULT_FILENAME: &str = "dato.json";

/// What a successful pull wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullSummary {
    pub models_len: usize,
    pub fields_len: usize,
    pub path: PathBuf,
}

/// The step a pull failed at; each gets its own diagnostic
#[derive(Debug, Clone, Error)]
pub enum PullFailure {
    #[error("fetch failed: {0}")]
    Fetch(ExError),
    #[error("write failed: {0}")]
    Write(ExError),
}

impl PullFailure {
    pub fn error(&self) -> &ExError {
        match self {
            PullFailure::Fetch(e) | PullFailure::Write(e) => e,
        }
    }
}

/// Fetch all models with `token` and write them to `path`.
///
/// # Errors
///
/// - `PullFailure::Fetch` when the remote fetch fails; nothing is written
/// - `PullFailure::Write` when the snapshot file cannot be written
pub async fn pull(
    token: &Sensitive<String>,
    path: &Path,
    fetcher: &dyn RecordFetcher,
) -> Result<PullSummary, PullFailure> {
    log_op_start!("pull", token = %token.hint(), path = %path.display());
    let start = std::time::Instant::now();

    let result = fetch_and_write(token, path, fetcher).await;

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(summary) => log_op_end!(
            "pull",
            duration_ms = elapsed,
            models_len = summary.models_len,
            fields_len = summary.fields_len
        ),
        Err(e) => {
            let e_clone = e.error().clone();
            log_op_error!("pull", e_clone, duration_ms = elapsed);
        }
    }
    result
}

async fn fetch_and_write(
    token: &Sensitive<String>,
    path: &Path,
    fetcher: &dyn RecordFetcher,
) -> Result<PullSummary, PullFailure> {
    let snapshot = fetcher.fetch(token).await.map_err(PullFailure::Fetch)?;
    write_snapshot(path, &snapshot.models).map_err(PullFailure::Write)?;
    Ok(PullSummary {
        models_len: snapshot.models_len(),
        fields_len: snapshot.fields_len(),
        path: path.to_path_buf(),
    })
}
