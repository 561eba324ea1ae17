use async_trait::async_trait;
use filedrop_core::models::{NewUpload, Upload, UploadStatus};
use filedrop_core::AppError;

/// Durable mapping from upload id to lifecycle state.
///
/// Implementations must tolerate concurrent `create` calls for different
/// records and concurrent `set_terminal_status` calls for different ids.
/// Only one writer (the relocation task) ever mutates a given record after
/// creation, so per-record last-writer-wins is acceptable.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Insert a new record with status `pending` and an empty error message.
    /// The returned id is usable for a lookup immediately.
    async fn create(&self, new: NewUpload) -> Result<i64, AppError>;

    /// Apply the terminal transition for a record. `error_message` must be
    /// non-empty when `status` is `Failed` and empty when `Success`; the
    /// caller upholds that, the store just persists it. An unknown id is a
    /// storage-layer failure.
    async fn set_terminal_status(
        &self,
        id: i64,
        status: UploadStatus,
        error_message: &str,
    ) -> Result<(), AppError>;

    /// Fetch a record by id. `AppError::NotFound` when no such record exists.
    async fn get(&self, id: i64) -> Result<Upload, AppError>;

    /// Check backing-store connectivity.
    async fn health_check(&self) -> Result<(), AppError>;
}
