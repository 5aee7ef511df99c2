//! Remote source of raw model records.

use async_trait::async_trait;
use datosync_core::errors::ExError;
use datosync_core::model::raw::count_fields;
use datosync_core::RawModel;
use datosync_core_types::Sensitive;

/// All models of one environment, each with its fields embedded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedSnapshot {
    pub models: Vec<RawModel>,
}

impl FetchedSnapshot {
    pub fn models_len(&self) -> usize {
        self.models.len()
    }

    pub fn fields_len(&self) -> usize {
        count_fields(&self.models)
    }
}

/// Fetches raw models given an access credential
///
/// Failures carry the remote status in `ExError::status_code` /
/// `ExError::status_text` when the server answered.
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    async fn fetch(&self, credential: &Sensitive<String>) -> Result<FetchedSnapshot, ExError>;
}
