//! DatoCMS Site API client.
//!
//! Only the two read endpoints a snapshot needs are covered:
//! `GET /item-types` and `GET /item-types/{id}/fields`.

pub mod client;
pub mod wire;

pub use client::{SiteApiClient, SiteApiConfig, DEFAULT_SITE_API_URL};
