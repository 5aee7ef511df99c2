#![allow(dead_code)]

use async_trait::async_trait;
use datosync_core::errors::{ExError, ExErrorKind};
use datosync_core::RawModel;
use datosync_engine::{FetchedSnapshot, RecordFetcher};
use datosync_core_types::Sensitive;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const TOKEN_A: &str = "token-environment-a";
pub const TOKEN_B: &str = "token-environment-b";

/// In-memory fetcher keyed by token; unknown tokens are rejected with 401
#[derive(Default)]
pub struct FakeFetcher {
    snapshots: HashMap<String, Vec<RawModel>>,
    calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn with(mut self, token: &str, models: Vec<RawModel>) -> Self {
        self.snapshots.insert(token.to_string(), models);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordFetcher for FakeFetcher {
    async fn fetch(&self, credential: &Sensitive<String>) -> Result<FetchedSnapshot, ExError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.snapshots.get(credential.expose()) {
            Some(models) => Ok(FetchedSnapshot {
                models: models.clone(),
            }),
            None => Err(ExError::new(ExErrorKind::Unauthorised)
                .with_op("list_item_types")
                .with_status_code(401)
                .with_status_text("Unauthorized")
                .with_message("401 INVALID_SITE (details: {})")),
        }
    }
}

pub fn models(value: Value) -> Vec<RawModel> {
    serde_json::from_value(value).expect("fixture should parse")
}

/// Two models, three fields in total
pub fn environment(article_name: &str) -> Vec<RawModel> {
    models(json!([
        {
            "id": "100",
            "apiKey": "article",
            "name": article_name,
            "titleField": "1000",
            "singletonItem": null,
            "fields": [
                {"id": "1000", "apiKey": "title", "label": "Title", "itemType": "100", "validators": {}},
                {
                    "id": "1001",
                    "apiKey": "author",
                    "label": "Author",
                    "itemType": "100",
                    "validators": {"itemItemType": {"itemTypes": ["200"]}}
                }
            ]
        },
        {
            "id": "200",
            "apiKey": "person",
            "name": "Person",
            "fields": [
                {"id": "2000", "apiKey": "name", "label": "Name", "itemType": "200", "validators": {}}
            ]
        }
    ]))
}

/// Same schema as `environment`, every id different
pub fn environment_with_other_ids(article_name: &str) -> Vec<RawModel> {
    let mut value = serde_json::to_value(environment(article_name)).expect("serialize");
    value[0]["id"] = json!("900");
    value[0]["titleField"] = json!("9000");
    value[0]["singletonItem"] = json!("12345");
    value[0]["fields"][0]["id"] = json!("9000");
    value[0]["fields"][1]["id"] = json!("9001");
    value[0]["fields"][1]["validators"]["itemItemType"]["itemTypes"] = json!(["800"]);
    value[1]["id"] = json!("800");
    value[1]["fields"][0]["id"] = json!("8000");
    models(value)
}
