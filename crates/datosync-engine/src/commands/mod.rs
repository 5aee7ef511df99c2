//! Command orchestration layer.
//!
//! Each command wraps its work in `log_op_start!` / `log_op_end!` (or
//! `log_op_error!`) and returns structured results. Rendering is left to the
//! caller.

pub mod diff;
pub mod pull;
pub mod source;

pub use diff::{diff_sources, DiffOutcome, FailureStage, SourceFailure};
pub use pull::{pull, PullFailure, PullSummary};
pub use source::{resolve_source, ResolvedSource, SourceKind};
