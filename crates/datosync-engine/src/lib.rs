//! DatoSync Engine - Orchestration layer
//!
//! Coordinates the pure core with its collaborators:
//! - [`fetcher::RecordFetcher`], the seam for pulling raw models remotely
//! - [`site_api`], the DatoCMS Site API implementation of that seam
//! - [`commands`], the `pull` and `diff` operations the CLI exposes

pub mod commands;
pub mod fetcher;
pub mod site_api;

pub use fetcher::{FetchedSnapshot, RecordFetcher};
pub use site_api::{SiteApiClient, SiteApiConfig};
