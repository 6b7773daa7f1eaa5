//! AI assistant edge function.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use edilhub_core::error::ErrorKind;
use edilhub_service::assistant::{AssistantRequest, GENERIC_ERROR_MESSAGE};

use crate::dto::response::{AssistantErrorResponse, AssistantResponse};
use crate::state::AppState;

/// POST /functions/v1/ai-assistant
///
/// Replies `{success, result}` on success, `{error}` otherwise. Rate-limit
/// and quota failures keep their upstream status code; everything else is
/// a 500 with a generic message.
pub async fn run(
    State(state): State<AppState>,
    body: Result<Json<AssistantRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            error!(error = %rejection, "Invalid AI assistant request body");
            return failure(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_MESSAGE);
        }
    };

    match state.assistant_service.run(&request).await {
        Ok(result) => (
            StatusCode::OK,
            Json(AssistantResponse {
                success: true,
                result,
            }),
        )
            .into_response(),
        Err(e) => match e.kind {
            ErrorKind::RateLimit => failure(StatusCode::TOO_MANY_REQUESTS, &e.message),
            ErrorKind::QuotaExceeded => failure(StatusCode::PAYMENT_REQUIRED, &e.message),
            _ => {
                error!(action = %request.action, error = %e, "AI assistant request failed");
                failure(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_MESSAGE)
            }
        },
    }
}

/// OPTIONS /functions/v1/ai-assistant
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

fn failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(AssistantErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
