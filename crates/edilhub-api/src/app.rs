//! Application builder: wires router, middleware, and state into an Axum app.

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state).layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use edilhub_core::config::AppConfig;
    use edilhub_database::{MemoryKeyValueStore, MemoryNotificationStore};
    use edilhub_service::PreferenceStore;

    use super::*;

    async fn app() -> Router {
        let store = Arc::new(MemoryNotificationStore::new());
        let port = Arc::new(MemoryKeyValueStore::new());
        let preferences = Arc::new(PreferenceStore::load(port).await.unwrap());
        build_app(AppState::new(AppConfig::default(), store, preferences))
    }

    #[tokio::test]
    async fn test_health_is_ok() {
        let response = app()
            .await
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_notification_is_not_found() {
        let uri = format!("/api/notifications/{}", uuid::Uuid::new_v4());
        let response = app()
            .await
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bad_filter_is_rejected() {
        let response = app()
            .await
            .oneshot(
                Request::get("/api/notifications?filter=tutte")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_assistant_preflight_allows_any_origin() {
        let response = app()
            .await
            .oneshot(
                Request::options("/functions/v1/ai-assistant")
                    .header("origin", "https://example.com")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .contains_key("access-control-allow-origin")
        );
    }
}
