//! CLI integration tests
//!
//! Drive the `datosync` binary against snapshot files in a temp directory.
//! Remote fallbacks point at a closed local port so nothing leaves the host.

use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const UNREACHABLE_API: &str = "http://127.0.0.1:9";

fn model(name: &str) -> Value {
    json!({
        "id": "72969",
        "name": name,
        "apiKey": "model_a",
        "singletonItem": null,
        "titleField": "289805",
        "orderingField": null,
        "fields": [{
            "id": "289805",
            "label": "Field One",
            "fieldType": "string",
            "apiKey": "field_one",
            "validators": {"required": {}},
            "itemType": "72969"
        }]
    })
}

fn write_json(dir: &Path, name: &str, value: &Value) -> String {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path.display().to_string()
}

fn datosync(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_datosync"))
        .current_dir(dir)
        .env_remove("DATOCMS_API_TOKEN")
        .env_remove("DATOSYNC_LOG_PROFILE")
        .env("NO_COLOR", "1")
        .env("DATOSYNC_SITE_API_URL", UNREACHABLE_API)
        .args(args)
        .output()
        .expect("Failed to execute datosync")
}

#[test]
fn test_diff_identical_files_passes() {
    let temp_dir = TempDir::new().unwrap();
    let src = write_json(temp_dir.path(), "src.json", &json!([model("Model A")]));
    let dest = write_json(temp_dir.path(), "dest.json", &json!([model("Model A")]));

    let output = datosync(temp_dir.path(), &["diff", &src, &dest]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        stdout,
        " PASS  model/model_a Model A\n\nModels: \t1 total\nFields: \t1 total\n"
    );
}

#[test]
fn test_diff_reports_changed_model() {
    let temp_dir = TempDir::new().unwrap();
    let src = write_json(temp_dir.path(), "src.json", &json!([model("Model A")]));
    let dest = write_json(temp_dir.path(), "dest.json", &json!([model("Model X")]));

    let output = datosync(temp_dir.path(), &["diff", &src, &dest]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.starts_with(" FAIL  model/model_a Model A\n"));
    assert!(stdout.contains("  \u{2022} model/model_a > Model A\n"));
    assert!(stdout.contains("    -   \"name\": \"Model A\",\n"));
    assert!(stdout.contains("    +   \"name\": \"Model X\",\n"));
    assert!(!stdout.contains('\u{1b}'), "NO_COLOR must disable styling");
}

#[test]
fn test_diff_unresolvable_source_prints_pull_error() {
    let temp_dir = TempDir::new().unwrap();
    let dest = write_json(temp_dir.path(), "dest.json", &json!([model("Model A")]));

    let output = datosync(temp_dir.path(), &["diff", "missing.json", &dest]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.starts_with(
        " FAIL  Cannot pull models and fields with token \"missing.json\"\n"
    ));
    assert!(stdout.contains("\"message\":"));
    assert!(!stdout.contains("Models:"));
}

#[test]
fn test_diff_inconsistent_snapshot_prints_normalize_error() {
    let temp_dir = TempDir::new().unwrap();
    let mut broken = model("Model A");
    broken["titleField"] = json!("404");
    let src = write_json(temp_dir.path(), "src.json", &json!([broken]));
    let dest = write_json(temp_dir.path(), "dest.json", &json!([model("Model A")]));

    let output = datosync(temp_dir.path(), &["diff", &src, &dest]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("Cannot normalize models from"));
    assert!(stdout.contains("ERR_UNRESOLVED_REFERENCE"));
}

#[test]
fn test_pull_with_unreachable_api_fails() {
    let temp_dir = TempDir::new().unwrap();

    let output = datosync(temp_dir.path(), &["pull", "--token", "site-api-token"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.starts_with(
        " FAIL  Cannot pull models and fields with token \"site-api-token\"\n"
    ));
    assert!(!temp_dir.path().join("dato.json").exists());
}

#[test]
fn test_pull_requires_token() {
    let temp_dir = TempDir::new().unwrap();

    let output = datosync(temp_dir.path(), &["pull"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--token"));
}

#[test]
fn test_missing_subcommand_prints_usage() {
    let temp_dir = TempDir::new().unwrap();

    let output = datosync(temp_dir.path(), &[]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}
