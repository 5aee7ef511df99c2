//! DatoSync Store - snapshot files on disk
//!
//! Provides:
//! - Reading a snapshot file (UTF-8 JSON array of raw models with embedded fields)
//! - Writing a pulled snapshot as pretty JSON via temp file + rename
//! - Store-specific error helpers on top of `ExError`

pub mod atomic;
pub mod errors;
pub mod snapshot;

// Re-export key types
pub use errors::Result;
pub use snapshot::{parse_snapshot, read_snapshot, write_snapshot};
