//! Status endpoint integration tests.
//!
//! Run with: `cargo test -p filedrop-api --test upload_status_test`

mod helpers;

use helpers::{setup_test_app, upload_file, wait_for_terminal};
use serde_json::Value;

#[tokio::test]
async fn test_missing_upload_id_is_400() {
    let app = setup_test_app();

    let response = app.client().get("/upload_status").await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(
        body.get("code").and_then(|v| v.as_str()),
        Some("INVALID_INPUT")
    );
}

#[tokio::test]
async fn test_non_numeric_upload_id_is_400() {
    let app = setup_test_app();

    let response = app
        .client()
        .get("/upload_status")
        .add_query_param("uploadID", "not-a-number")
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_unknown_upload_id_is_404() {
    let app = setup_test_app();

    let response = app
        .client()
        .get("/upload_status")
        .add_query_param("uploadID", "99999")
        .await;
    assert_eq!(response.status_code(), 404);

    let body: Value = response.json();
    assert_eq!(body.get("code").and_then(|v| v.as_str()), Some("NOT_FOUND"));
}

#[tokio::test]
async fn test_status_returns_full_record() {
    let app = setup_test_app();

    let id = upload_file(&app, "record.txt", b"payload").await;
    let record = wait_for_terminal(&app, id).await;

    for key in [
        "id",
        "filename",
        "source_path",
        "destination_path",
        "upload_time",
        "status",
        "error_message",
    ] {
        assert!(record.get(key).is_some(), "missing field {}", key);
    }
    assert_eq!(record.get("id").and_then(|v| v.as_i64()), Some(id));
}
