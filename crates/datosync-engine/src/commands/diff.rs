//! `diff`: resolve two sources, normalize both, compare.

#![allow(clippy::result_large_err)]

use crate::commands::source::resolve_source;
use crate::fetcher::RecordFetcher;
use datosync_core::errors::ExError;
use datosync_core::{diff_models, log_op_end, log_op_error, log_op_start, normalize, ModelDiff};
use datosync_core::{CanonicalModels, RawModel};
use datosync_core_types::schema::{SIDE_DEST, SIDE_SRC};
use datosync_core_types::Sensitive;

/// Which step failed for a side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// Neither a readable snapshot file nor a working credential
    Resolve,
    /// The models were obtained but are internally inconsistent
    Normalize,
}

/// One side of a diff that could not be turned into canonical models
#[derive(Debug, Clone)]
pub struct SourceFailure {
    /// `src` or `dest`
    pub side: &'static str,
    pub descriptor: Sensitive<String>,
    pub stage: FailureStage,
    pub error: ExError,
}

#[derive(Debug, Clone)]
pub enum DiffOutcome {
    /// Both sides resolved; one entry per model apiKey
    Diffed(Vec<ModelDiff>),
    /// At least one side failed; failures are listed src first
    Failed(Vec<SourceFailure>),
}

impl DiffOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, DiffOutcome::Failed(_))
    }
}

/// Resolve both descriptors concurrently and diff their models.
///
/// No diff is computed unless both sides resolve and normalize.
pub async fn diff_sources(
    src: &Sensitive<String>,
    dest: &Sensitive<String>,
    fetcher: &dyn RecordFetcher,
) -> DiffOutcome {
    log_op_start!("diff");
    let start = std::time::Instant::now();

    let (resolved_src, resolved_dest) =
        tokio::join!(resolve_source(src, fetcher), resolve_source(dest, fetcher));

    let canonical_src = canonicalize(SIDE_SRC, src, resolved_src.map(|s| s.models));
    let canonical_dest = canonicalize(SIDE_DEST, dest, resolved_dest.map(|s| s.models));

    let outcome = match (canonical_src, canonical_dest) {
        (Ok(a), Ok(b)) => DiffOutcome::Diffed(diff_models(&a, &b)),
        (a, b) => DiffOutcome::Failed(a.err().into_iter().chain(b.err()).collect()),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    match &outcome {
        DiffOutcome::Diffed(diffs) => log_op_end!(
            "diff",
            duration_ms = elapsed,
            models_len = diffs.len(),
            unequal_len = diffs.iter().filter(|d| !d.equal).count()
        ),
        DiffOutcome::Failed(failures) => {
            for failure in failures {
                let e_clone = failure.error.clone();
                log_op_error!(
                    "diff",
                    e_clone,
                    duration_ms = elapsed,
                    side = failure.side
                );
            }
        }
    }
    outcome
}

fn canonicalize(
    side: &'static str,
    descriptor: &Sensitive<String>,
    resolved: Result<Vec<RawModel>, ExError>,
) -> Result<CanonicalModels, SourceFailure> {
    let failure = |stage, error| SourceFailure {
        side,
        descriptor: descriptor.clone(),
        stage,
        error,
    };

    let models = resolved.map_err(|e| failure(FailureStage::Resolve, e))?;
    normalize(&models).map_err(|e| {
        let error = ExError::from(e).with_op("normalize");
        failure(FailureStage::Normalize, error)
    })
}
