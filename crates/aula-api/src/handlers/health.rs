use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

#[derive(Serialize)]
struct HealthCheckResponse {
    status: String,
    database: String,
    storage: String,
}

/// Liveness probe with component status. Always returns 200 while the
/// process can respond; degraded dependencies are reported in the body but
/// do not fail the check.
#[utoipa::path(
    get,
    path = "/api/files/health",
    tag = "files",
    responses(
        (status = 200, description = "Service is alive")
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    const TIMEOUT: Duration = Duration::from_secs(5);

    let mut response = HealthCheckResponse {
        status: "ok".to_string(),
        database: "unknown".to_string(),
        storage: "unknown".to_string(),
    };

    match tokio::time::timeout(TIMEOUT, sqlx::query("SELECT 1").execute(&state.db_pool)).await {
        Ok(Ok(_)) => {
            response.database = "healthy".to_string();
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Database health check failed");
            response.database = "unhealthy".to_string();
        }
        Err(_) => {
            tracing::warn!("Database health check timed out");
            response.database = "timeout".to_string();
        }
    }

    // Lightweight connectivity probe with a key that never exists
    match tokio::time::timeout(
        TIMEOUT,
        state.storage.exists("health-check-non-existent-key"),
    )
    .await
    {
        Ok(Ok(_)) => {
            response.storage = "healthy".to_string();
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Storage health check warning");
            response.storage = "degraded".to_string();
        }
        Err(_) => {
            tracing::warn!("Storage health check timed out");
            response.storage = "timeout".to_string();
        }
    }

    (StatusCode::OK, Json(response))
}
