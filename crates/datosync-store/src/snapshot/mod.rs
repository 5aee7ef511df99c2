//! Snapshot file format: a JSON array of raw models, fields embedded.

pub mod read;
pub mod write;

pub use read::{parse_snapshot, read_snapshot};
pub use write::{render_snapshot, write_snapshot};
