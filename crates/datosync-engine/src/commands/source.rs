//! Source resolution: a descriptor is a snapshot file path or an access token.

#![allow(clippy::result_large_err)]

use crate::fetcher::RecordFetcher;
use datosync_core::errors::ExError;
use datosync_core::{log_op_end, log_op_error, log_op_start, RawModel};
use datosync_core_types::Sensitive;
use datosync_store::read_snapshot;
use std::path::Path;

/// Where a resolved model list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    File,
    Remote,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSource {
    pub kind: SourceKind,
    pub models: Vec<RawModel>,
}

/// Resolve a descriptor to raw models.
///
/// The descriptor is first read as a snapshot file. If the file cannot be read
/// or parsed, the same descriptor is used as a credential for a remote fetch.
///
/// # Errors
///
/// The remote fetch error. A file error is never returned, it only triggers
/// the fallback.
pub async fn resolve_source(
    descriptor: &Sensitive<String>,
    fetcher: &dyn RecordFetcher,
) -> Result<ResolvedSource, ExError> {
    log_op_start!("resolve_source", descriptor = %descriptor.hint());
    let start = std::time::Instant::now();

    let result = match read_snapshot(Path::new(descriptor.expose())) {
        Ok(models) => Ok(ResolvedSource {
            kind: SourceKind::File,
            models,
        }),
        Err(file_err) => {
            tracing::debug!(
                descriptor = %descriptor.hint(),
                err.code = file_err.code(),
                "Descriptor is not a snapshot file, fetching remotely"
            );
            fetcher
                .fetch(descriptor)
                .await
                .map(|snapshot| ResolvedSource {
                    kind: SourceKind::Remote,
                    models: snapshot.models,
                })
        }
    };

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(source) => log_op_end!(
            "resolve_source",
            duration_ms = elapsed,
            models_len = source.models.len()
        ),
        Err(e) => {
            let e_clone = e.clone();
            log_op_error!("resolve_source", e_clone, duration_ms = elapsed);
        }
    }
    result
}
