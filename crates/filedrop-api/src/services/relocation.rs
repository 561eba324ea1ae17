//! Background relocation task.
//!
//! Moves exactly one staged file to its destination and records the outcome.
//! The task boundary guarantees a terminal status write on every exit path:
//! the move runs inside an inner spawned task, so a panic surfaces here as a
//! `JoinError` and is recorded as a `failed` transition instead of leaving
//! the record `pending` forever. One attempt per upload; no retries.
//!
//! There is no timeout on the move itself. A hanging filesystem call leaves
//! the record `pending` indefinitely; callers observe that through the
//! status endpoint.

use std::path::PathBuf;
use std::sync::Arc;

use filedrop_core::models::UploadStatus;
use filedrop_db::UploadStore;
use tokio::task::{JoinError, JoinHandle};

/// Schedule the relocation for an upload record. Fire-and-forget from the
/// caller's perspective; the returned handle exists for tests.
pub fn spawn(
    store: Arc<dyn UploadStore>,
    id: i64,
    source: PathBuf,
    destination: PathBuf,
) -> JoinHandle<()> {
    tokio::spawn(supervise(store, id, source, destination))
}

/// Run the move inside an inner task and always reach a terminal
/// `set_terminal_status` call, whatever the move did.
async fn supervise(store: Arc<dyn UploadStore>, id: i64, source: PathBuf, destination: PathBuf) {
    tracing::debug!(
        id,
        source = %source.display(),
        destination = %destination.display(),
        "Starting relocation"
    );

    let move_task = tokio::spawn(async move {
        tokio::fs::rename(&source, &destination).await.map_err(|e| {
            format!(
                "failed to move {} to {}: {}",
                source.display(),
                destination.display(),
                e
            )
        })
    });

    let (status, error_message) = terminal_outcome(move_task.await);
    match status {
        UploadStatus::Success => tracing::info!(id, "Relocation completed"),
        _ => tracing::warn!(id, error = %error_message, "Relocation failed"),
    }

    if let Err(e) = store.set_terminal_status(id, status, &error_message).await {
        // Nothing left to do but make the orphaned record loud in the logs.
        tracing::error!(id, error = %e, "Failed to record terminal upload status");
    }
}

/// Map the inner task outcome onto the terminal state. A join error means
/// the move future panicked (or was aborted) before producing a result.
fn terminal_outcome(result: Result<Result<(), String>, JoinError>) -> (UploadStatus, String) {
    match result {
        Ok(Ok(())) => (UploadStatus::Success, String::new()),
        Ok(Err(message)) => (UploadStatus::Failed, message),
        Err(join_err) => (
            UploadStatus::Failed,
            format!("relocation task fault: {}", join_err),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedrop_db::InMemoryUploadStore;
    use filedrop_core::models::NewUpload;

    async fn create_record(store: &InMemoryUploadStore, name: &str) -> i64 {
        store
            .create(NewUpload {
                filename: name.to_string(),
                source_path: format!("staging/{}", name),
                destination_path: format!("uploads/{}", name),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_successful_move_reaches_success() {
        let staging = tempfile::tempdir().unwrap();
        let uploads = tempfile::tempdir().unwrap();
        let source = staging.path().join("report.txt");
        let destination = uploads.path().join("report.txt");
        tokio::fs::write(&source, b"contents").await.unwrap();

        let store = Arc::new(InMemoryUploadStore::new());
        let id = create_record(&store, "report.txt").await;

        spawn(store.clone(), id, source.clone(), destination.clone())
            .await
            .unwrap();

        let record = store.get(id).await.unwrap();
        assert_eq!(record.status, UploadStatus::Success);
        assert!(record.error_message.is_empty());
        assert!(!source.exists());
        assert_eq!(
            tokio::fs::read(&destination).await.unwrap(),
            b"contents".to_vec()
        );
    }

    #[tokio::test]
    async fn test_missing_source_reaches_failed_with_detail() {
        let staging = tempfile::tempdir().unwrap();
        let uploads = tempfile::tempdir().unwrap();
        let source = staging.path().join("ghost.txt");
        let destination = uploads.path().join("ghost.txt");

        let store = Arc::new(InMemoryUploadStore::new());
        let id = create_record(&store, "ghost.txt").await;

        spawn(store.clone(), id, source, destination).await.unwrap();

        let record = store.get(id).await.unwrap();
        assert_eq!(record.status, UploadStatus::Failed);
        assert!(!record.error_message.is_empty());
    }

    #[tokio::test]
    async fn test_unwritable_destination_reaches_failed() {
        let staging = tempfile::tempdir().unwrap();
        let source = staging.path().join("report.txt");
        tokio::fs::write(&source, b"contents").await.unwrap();
        // Destination directory does not exist, so the rename cannot land.
        let destination = staging.path().join("no-such-dir").join("report.txt");

        let store = Arc::new(InMemoryUploadStore::new());
        let id = create_record(&store, "report.txt").await;

        spawn(store.clone(), id, source.clone(), destination)
            .await
            .unwrap();

        let record = store.get(id).await.unwrap();
        assert_eq!(record.status, UploadStatus::Failed);
        assert!(!record.error_message.is_empty());
        assert!(source.exists());
    }

    #[tokio::test]
    async fn test_terminal_outcome_mapping() {
        let (status, message) = terminal_outcome(Ok(Ok(())));
        assert_eq!(status, UploadStatus::Success);
        assert!(message.is_empty());

        let (status, message) = terminal_outcome(Ok(Err("cross-device link".to_string())));
        assert_eq!(status, UploadStatus::Failed);
        assert_eq!(message, "cross-device link");
    }

    #[tokio::test]
    async fn test_panicked_move_maps_to_failed() {
        // Manufacture a real JoinError by letting an inner task panic.
        let join_err = tokio::spawn(async { panic!("boom") })
            .await
            .expect_err("task should panic");

        let (status, message) = terminal_outcome(Err(join_err));
        assert_eq!(status, UploadStatus::Failed);
        assert!(message.contains("relocation task fault"));
    }
}
