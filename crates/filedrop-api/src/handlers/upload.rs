use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use filedrop_core::models::UploadAccepted;
use filedrop_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Upload a file
///
/// Buffers the `file` multipart field into the staging directory, creates a
/// `pending` record, and schedules the relocation task. Relocation happens
/// after the response is sent; poll `/upload_status` for the outcome.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Upload accepted, relocation scheduled", body = UploadAccepted),
        (status = 400, description = "Missing or invalid form data", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadAccepted>), HttpAppError> {
    let mut file = None;
    while let Some(field) = multipart.next_field().await.map_err(HttpAppError::from)? {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await.map_err(HttpAppError::from)?;
            file = Some((filename, data));
            break;
        }
    }

    let Some((raw_filename, data)) = file else {
        return Err(AppError::InvalidInput("Form field `file` is required".to_string()).into());
    };

    // Keep only the final path component of the client-supplied name so an
    // upload can never escape the staging or upload directory.
    let filename = Path::new(&raw_filename)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::InvalidInput("File field has no usable filename".to_string()))?;

    let staged_path = state.config.staging_dir.join(&filename);
    tokio::fs::write(&staged_path, &data).await.map_err(|e| {
        AppError::Internal(format!(
            "Failed to save file to staging location {}: {}",
            staged_path.display(),
            e
        ))
    })?;

    let id = state.lifecycle.accept(&filename, &staged_path).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadAccepted {
            message: "File uploaded successfully. Processing in the background.".to_string(),
            upload_id: id,
        }),
    ))
}
