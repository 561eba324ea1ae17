//! Test helpers: build AppState and router for integration tests.
//!
//! The tests run against the in-memory store and tempdir staging/upload
//! directories, so no database or external service is needed.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum_test::TestServer;
use filedrop_api::setup::routes;
use filedrop_api::state::AppState;
use filedrop_api::UploadLifecycle;
use filedrop_core::{Config, StoreBackend};
use filedrop_db::InMemoryUploadStore;
use serde_json::Value;
use tempfile::TempDir;

pub const BOUNDARY: &str = "filedrop-test-boundary";

/// Knobs for tests that need a non-default app.
pub struct TestOptions {
    pub max_upload_size_bytes: usize,
    /// When false, the upload directory is left uncreated so every
    /// relocation fails and directory traversal errors.
    pub writable_destination: bool,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            max_upload_size_bytes: 10 << 20,
            writable_destination: true,
        }
    }
}

/// Test application: server plus the owned tempdirs.
pub struct TestApp {
    pub server: TestServer,
    pub upload_dir: PathBuf,
    _staging: TempDir,
    _uploads: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(TestOptions::default())
}

pub fn setup_test_app_with(options: TestOptions) -> TestApp {
    let staging = tempfile::tempdir().expect("Failed to create staging tempdir");
    let uploads = tempfile::tempdir().expect("Failed to create uploads tempdir");

    let upload_dir = if options.writable_destination {
        uploads.path().to_path_buf()
    } else {
        uploads.path().join("missing")
    };

    let config = Config {
        server_port: 0,
        upload_dir: upload_dir.clone(),
        staging_dir: staging.path().to_path_buf(),
        store_backend: StoreBackend::Memory,
        database_url: None,
        db_max_connections: 1,
        db_timeout_seconds: 1,
        max_upload_size_bytes: options.max_upload_size_bytes,
        environment: "test".to_string(),
    };

    let store = Arc::new(InMemoryUploadStore::new());
    let lifecycle = UploadLifecycle::new(store.clone(), upload_dir.clone());
    let state = Arc::new(AppState {
        config,
        store,
        lifecycle,
    });

    let server = TestServer::new(routes::setup_routes(state)).expect("Failed to build test server");

    TestApp {
        server,
        upload_dir,
        _staging: staging,
        _uploads: uploads,
    }
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

/// Raw multipart body with a single `file` field.
pub fn multipart_file_body(filename: &str, contents: &[u8]) -> Bytes {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            BOUNDARY, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    Bytes::from(body)
}

/// Multipart body with no `file` field at all.
pub fn multipart_without_file() -> Bytes {
    Bytes::from(format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{b}--\r\n",
        b = BOUNDARY
    ))
}

/// Upload a file and return the assigned upload id.
pub async fn upload_file(app: &TestApp, filename: &str, contents: &[u8]) -> i64 {
    let response = app
        .client()
        .post("/upload")
        .add_header("Content-Type", multipart_content_type())
        .bytes(multipart_file_body(filename, contents))
        .await;
    assert_eq!(response.status_code(), 201);

    let body: Value = response.json();
    body.get("uploadID")
        .and_then(|v| v.as_i64())
        .expect("uploadID missing from upload response")
}

/// Fetch the upload record JSON for an id.
pub async fn get_status(app: &TestApp, id: i64) -> Value {
    let response = app
        .client()
        .get("/upload_status")
        .add_query_param("uploadID", id.to_string())
        .await;
    assert_eq!(response.status_code(), 200);
    response.json()
}

/// Poll the status endpoint until the record leaves `pending`.
pub async fn wait_for_terminal(app: &TestApp, id: i64) -> Value {
    for _ in 0..200 {
        let record = get_status(app, id).await;
        let status = record.get("status").and_then(|v| v.as_str()).unwrap_or("");
        if status != "pending" {
            return record;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("upload {} never reached a terminal state", id);
}
