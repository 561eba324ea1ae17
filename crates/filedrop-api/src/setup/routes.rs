//! Route configuration and setup.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

/// Setup all application routes.
///
/// Requests to a known path with the wrong method get a 405 from the method
/// router; the body limit layer answers oversized uploads with a 413.
pub fn setup_routes(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.config.max_upload_size_bytes;

    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);

    Router::new()
        .route("/upload", post(handlers::upload::upload_file))
        .route("/upload_status", get(handlers::upload_status::upload_status))
        .route("/list_files", get(handlers::list_files::list_files))
        .route("/health", get(handlers::health::health_check))
        .route("/api/openapi.json", get(openapi_json))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
