//! Health check handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::constants::SERVICE_NAME;
use crate::state::AppState;

const DB_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub environment: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DbCheckResponse {
    pub status: String,
    pub database: String,
}

/// Liveness: the process is up. Does not touch the database.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is running", body = HealthResponse))
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: state.config.api_version().to_string(),
        environment: state.config.environment().to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/db-check",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = DbCheckResponse),
        (status = 503, description = "Database unreachable or timed out", body = DbCheckResponse),
    )
)]
pub async fn db_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let query = sqlx::query("SELECT 1").execute(&state.db.pool);
    let (code, database) = match tokio::time::timeout(DB_CHECK_TIMEOUT, query).await {
        Ok(Ok(_)) => (StatusCode::OK, "connected".to_string()),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Database check failed");
            (StatusCode::SERVICE_UNAVAILABLE, format!("unhealthy: {}", e))
        }
        Err(_) => {
            tracing::error!("Database check timed out");
            (StatusCode::SERVICE_UNAVAILABLE, "timeout".to_string())
        }
    };
    let status = if code == StatusCode::OK { "ok" } else { "error" };
    (
        code,
        Json(DbCheckResponse {
            status: status.to_string(),
            database,
        }),
    )
}
