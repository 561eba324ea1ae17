use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use filedrop_core::models::{NewUpload, Upload, UploadStatus};
use filedrop_core::AppError;

use crate::store::UploadStore;

/// In-memory upload store.
///
/// Backs the `memory` store backend and the integration tests, where pulling
/// up a Postgres instance would be overkill. Same contract as
/// [`PgUploadStore`](crate::PgUploadStore): monotonic ids, `pending` on
/// creation, single terminal transition.
pub struct InMemoryUploadStore {
    records: RwLock<HashMap<i64, Upload>>,
    next_id: AtomicI64,
}

impl InMemoryUploadStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryUploadStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UploadStore for InMemoryUploadStore {
    async fn create(&self, new: NewUpload) -> Result<i64, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let upload = Upload {
            id,
            filename: new.filename,
            source_path: new.source_path,
            destination_path: new.destination_path,
            upload_time: Utc::now(),
            status: UploadStatus::Pending,
            error_message: String::new(),
        };
        let mut records = self
            .records
            .write()
            .map_err(|_| AppError::Internal("upload store lock poisoned".to_string()))?;
        records.insert(id, upload);
        Ok(id)
    }

    async fn set_terminal_status(
        &self,
        id: i64,
        status: UploadStatus,
        error_message: &str,
    ) -> Result<(), AppError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| AppError::Internal("upload store lock poisoned".to_string()))?;
        match records.get_mut(&id) {
            Some(upload) => {
                upload.status = status;
                upload.error_message = error_message.to_string();
                Ok(())
            }
            None => Err(AppError::Internal(format!(
                "no upload record with id {} to update",
                id
            ))),
        }
    }

    async fn get(&self, id: i64) -> Result<Upload, AppError> {
        let records = self
            .records
            .read()
            .map_err(|_| AppError::Internal("upload store lock poisoned".to_string()))?;
        records
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Upload {} not found", id)))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
