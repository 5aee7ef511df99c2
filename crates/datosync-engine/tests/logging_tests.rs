#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{environment, FakeFetcher, TOKEN_A};
use datosync_core::logging_facility::test_capture::init_test_capture;
use datosync_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use datosync_core_types::Sensitive;
use datosync_engine::commands::{diff_sources, pull};
use tempfile::TempDir;

#[tokio::test]
async fn test_pull_logs_start_and_end_without_token() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();
    let fetcher = FakeFetcher::default().with(TOKEN_A, environment("Article"));

    pull(&Sensitive::from(TOKEN_A), &dir.path().join("dato.json"), &fetcher)
        .await
        .unwrap();

    capture.assert_event_exists("pull", EVENT_START);
    capture.assert_event_exists("pull", EVENT_END);
    let leaked = capture.count_events(|e| e.fields.values().any(|v| v.contains(TOKEN_A)));
    assert_eq!(leaked, 0, "token must never be logged in clear");
}

#[tokio::test]
async fn test_failed_diff_logs_end_error_per_side() {
    let capture = init_test_capture();
    let fetcher = FakeFetcher::default();

    diff_sources(&Sensitive::from("x1"), &Sensitive::from("x2"), &fetcher).await;

    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some("diff") && e.event.as_deref() == Some(EVENT_END_ERROR)
    });
    assert!(errors >= 2);
    let err_event = capture
        .events_for_op("diff")
        .into_iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .unwrap();
    assert_eq!(
        err_event.fields.get("err.code"),
        Some(&"ERR_UNAUTHORISED".to_string())
    );
}
