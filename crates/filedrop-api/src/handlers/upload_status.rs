use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use filedrop_core::models::Upload;
use filedrop_core::AppError;
use serde::Deserialize;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(rename = "uploadID")]
    upload_id: Option<String>,
}

/// Look up the lifecycle state of an upload
///
/// Returns the full record, including the terminal error message when the
/// relocation failed.
#[utoipa::path(
    get,
    path = "/upload_status",
    tag = "uploads",
    params(
        ("uploadID" = Option<String>, Query, description = "Numeric id returned by POST /upload")
    ),
    responses(
        (status = 200, description = "Upload record", body = Upload),
        (status = 400, description = "uploadID missing or not numeric", body = ErrorResponse),
        (status = 404, description = "No such upload", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query))]
pub async fn upload_status(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Upload>, HttpAppError> {
    let raw = query
        .upload_id
        .ok_or_else(|| AppError::InvalidInput("uploadID is required".to_string()))?;
    let id: i64 = raw
        .parse()
        .map_err(|_| AppError::InvalidInput("Invalid uploadID".to_string()))?;

    let upload = state.store.get(id).await?;
    Ok(Json(upload))
}
