//! Upload lifecycle controller.
//!
//! Bridges a fully-buffered upload into a durable `pending` record and a
//! fire-and-forget relocation task. The caller gets the record id back
//! immediately; the terminal transition happens in the background.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use filedrop_core::models::NewUpload;
use filedrop_core::AppError;
use filedrop_db::UploadStore;

use crate::services::relocation;

#[derive(Clone)]
pub struct UploadLifecycle {
    store: Arc<dyn UploadStore>,
    upload_dir: PathBuf,
}

impl UploadLifecycle {
    pub fn new(store: Arc<dyn UploadStore>, upload_dir: PathBuf) -> Self {
        Self { store, upload_dir }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Final on-disk location for a filename. Deterministic join with the
    /// upload directory: two uploads with the same filename target the same
    /// destination, and the later relocation wins.
    pub fn destination_for(&self, filename: &str) -> PathBuf {
        self.upload_dir.join(filename)
    }

    /// Accept a staged upload: create the record, schedule relocation,
    /// return the id. The record is still `pending` when this returns.
    ///
    /// If the record cannot be created the staged file is removed
    /// best-effort and the storage error propagates.
    #[tracing::instrument(skip(self, staged_path), fields(staged = %staged_path.display()))]
    pub async fn accept(&self, filename: &str, staged_path: &Path) -> Result<i64, AppError> {
        let destination = self.destination_for(filename);

        let new = NewUpload {
            filename: filename.to_string(),
            source_path: staged_path.to_string_lossy().into_owned(),
            destination_path: destination.to_string_lossy().into_owned(),
        };

        let id = match self.store.create(new).await {
            Ok(id) => id,
            Err(e) => {
                if let Err(remove_err) = tokio::fs::remove_file(staged_path).await {
                    tracing::warn!(
                        error = %remove_err,
                        path = %staged_path.display(),
                        "Failed to remove staged file after store error"
                    );
                }
                return Err(e);
            }
        };

        tracing::info!(id, filename, "Upload accepted");
        relocation::spawn(self.store.clone(), id, staged_path.to_path_buf(), destination);

        Ok(id)
    }
}
