//! Health check handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::{ApiResponse, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    }))
}

/// GET /api/health/detailed
pub async fn health_detailed(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<DetailedHealthResponse>>) {
    let (status, store) = match state.store.health_check().await {
        Ok(()) => (StatusCode::OK, "connected".to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "Notification store health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable".to_string())
        }
    };

    (
        status,
        Json(ApiResponse::ok(DetailedHealthResponse {
            status: if status.is_success() { "ok" } else { "degraded" }.to_string(),
            store,
            assistant_configured: state.config.assistant.is_configured(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
        })),
    )
}
