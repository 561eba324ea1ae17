//! Health check handler and response type.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::state::AppState;

/// Run an async check with timeout; returns "healthy", "timeout", or
/// "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct HealthCheckResponse {
    pub status: String,
    pub database: String,
}

/// Readiness probe: the store is the only critical dependency.
#[utoipa::path(
    get,
    path = "/health",
    tag = "uploads",
    responses(
        (status = 200, description = "Service healthy", body = HealthCheckResponse),
        (status = 503, description = "Store unreachable or slow", body = HealthCheckResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database = run_check(
        Duration::from_secs(2),
        state.store.health_check(),
        "unhealthy",
    )
    .await;

    let healthy = database == "healthy";
    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthCheckResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            database,
        }),
    )
}
