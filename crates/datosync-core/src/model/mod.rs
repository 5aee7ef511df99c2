//! Schema records before and after normalization.
//!
//! [`raw`] mirrors what a snapshot file or the remote API delivers.
//! [`canonical`] is the id-free form the differ works on.

pub mod canonical;
pub mod raw;

pub use canonical::{CanonicalField, CanonicalModel, CanonicalModels};
pub use raw::{RawField, RawModel};
