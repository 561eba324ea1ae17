use std::path::Path;
use std::sync::Arc;

use axum::{extract::State, Json};
use filedrop_core::AppError;
use walkdir::WalkDir;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// List relocated files
///
/// Recursively walks the upload directory and returns the relative path of
/// every file found. Records still `pending` or `failed` have no file here.
#[utoipa::path(
    get,
    path = "/list_files",
    tag = "uploads",
    responses(
        (status = 200, description = "Relative file paths under the upload directory", body = Vec<String>),
        (status = 500, description = "Traversal failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, HttpAppError> {
    let root = state.config.upload_dir.clone();
    let files = tokio::task::spawn_blocking(move || collect_files(&root))
        .await
        .map_err(|e| AppError::Internal(format!("File listing task failed: {}", e)))??;
    Ok(Json(files))
}

fn collect_files(root: &Path) -> Result<Vec<String>, AppError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry
            .map_err(|e| AppError::Internal(format!("Failed to walk upload directory: {}", e)))?;
        if entry.file_type().is_file() {
            let relative = entry.path().strip_prefix(root).map_err(|e| {
                AppError::Internal(format!("Failed to relativize {}: {}", entry.path().display(), e))
            })?;
            files.push(relative.to_string_lossy().into_owned());
        }
    }
    files.sort();
    Ok(files)
}
