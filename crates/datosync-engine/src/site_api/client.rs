//! HTTP client for the Site API.

#![allow(clippy::result_large_err)]

use crate::fetcher::{FetchedSnapshot, RecordFetcher};
use crate::site_api::wire::{error_message, model_record, Document, Resource};
use async_trait::async_trait;
use datosync_core::errors::{ExError, ExErrorKind};
use datosync_core::RawModel;
use datosync_core_types::Sensitive;
use futures::future::try_join_all;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;

pub const DEFAULT_SITE_API_URL: &str = "https://site-api.datocms.com";
const DEFAULT_API_VERSION: &str = "3";

/// Connection settings for [`SiteApiClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteApiConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// Value of the `X-Api-Version` header
    pub api_version: String,
}

impl Default for SiteApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SITE_API_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl SiteApiConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Read-only Site API client; implements [`RecordFetcher`]
#[derive(Debug, Clone)]
pub struct SiteApiClient {
    http: reqwest::Client,
    config: SiteApiConfig,
}

impl SiteApiClient {
    /// Build a client for the given configuration
    ///
    /// # Errors
    ///
    /// `Internal` when the HTTP client cannot be constructed (TLS backend setup)
    pub fn new(config: SiteApiConfig) -> Result<Self, ExError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("datosync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ExError::new(ExErrorKind::Internal)
                    .with_op("site_api_client")
                    .with_message(format!("Failed to build HTTP client: {}", e))
            })?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &SiteApiConfig {
        &self.config
    }

    /// `GET /item-types`
    ///
    /// # Errors
    ///
    /// See [`SiteApiClient::get_document`]
    pub async fn item_types(&self, token: &Sensitive<String>) -> Result<Vec<Resource>, ExError> {
        self.get_document(token, "/item-types", "list_item_types")
            .await
            .map(|doc| doc.data)
    }

    /// `GET /item-types/{id}/fields`
    ///
    /// # Errors
    ///
    /// See [`SiteApiClient::get_document`]
    pub async fn fields(
        &self,
        token: &Sensitive<String>,
        item_type_id: &str,
    ) -> Result<Vec<Resource>, ExError> {
        let path = format!("/item-types/{}/fields", item_type_id);
        self.get_document(token, &path, "list_fields")
            .await
            .map(|doc| doc.data)
    }

    /// GET a JSON:API collection
    ///
    /// # Errors
    ///
    /// - `Unauthorised` for a 401 answer
    /// - `ExternalService` for any other non-2xx answer, a transport failure or
    ///   a body that is not a JSON:API collection
    async fn get_document(
        &self,
        token: &Sensitive<String>,
        path: &str,
        op: &str,
    ) -> Result<Document, ExError> {
        let url = format!("{}{}", self.config.base_url, path);
        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", token.expose()))
            .header(ACCEPT, "application/json")
            .header("X-Api-Version", self.config.api_version.as_str())
            .send()
            .await
            .map_err(|e| transport_error(op, e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| transport_error(op, e))?;

        if !status.is_success() {
            tracing::debug!(op, status = status.as_u16(), "Site API request rejected");
            return Err(status_error(op, status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            ExError::new(ExErrorKind::ExternalService)
                .with_op(op.to_string())
                .with_status_code(status.as_u16())
                .with_message(format!("Unexpected response body: {}", e))
        })
    }
}

fn transport_error(op: &str, err: reqwest::Error) -> ExError {
    ExError::new(ExErrorKind::ExternalService)
        .with_op(op.to_string())
        .with_message(err.to_string())
}

fn status_error(op: &str, status: StatusCode, body: &str) -> ExError {
    let kind = if status == StatusCode::UNAUTHORIZED {
        ExErrorKind::Unauthorised
    } else {
        ExErrorKind::ExternalService
    };
    let mut err = ExError::new(kind)
        .with_op(op.to_string())
        .with_status_code(status.as_u16())
        .with_message(error_message(status.as_u16(), body));
    if let Some(reason) = status.canonical_reason() {
        err = err.with_status_text(reason);
    }
    err
}

#[async_trait]
impl RecordFetcher for SiteApiClient {
    /// All item types, then the fields of every item type concurrently
    async fn fetch(&self, credential: &Sensitive<String>) -> Result<FetchedSnapshot, ExError> {
        let item_types = self.item_types(credential).await?;
        let fields = try_join_all(
            item_types
                .iter()
                .map(|item_type| self.fields(credential, &item_type.id)),
        )
        .await?;

        let mut models = Vec::with_capacity(item_types.len());
        for (item_type, fields) in item_types.into_iter().zip(fields) {
            let record = model_record(item_type, fields);
            let model: RawModel = serde_json::from_value(record).map_err(|e| {
                ExError::new(ExErrorKind::ExternalService)
                    .with_op("fetch_models")
                    .with_message(format!("Item type is missing required attributes: {}", e))
            })?;
            models.push(model);
        }

        Ok(FetchedSnapshot { models })
    }
}
