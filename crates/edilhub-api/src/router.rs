//! Route definitions for the EdilHub HTTP API.
//!
//! Application routes are mounted under `/api` behind the configured CORS
//! policy. Edge functions live under `/functions/v1` and accept calls from
//! any origin.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(notification_routes())
        .merge(preference_routes())
        .merge(health_routes())
        .layer(build_cors_layer(&state.config.server.cors));

    Router::new()
        .nest("/api", api_routes)
        .nest("/functions/v1", function_routes())
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Notification feed and state transitions
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications)
                .post(handlers::notification::publish),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}",
            get(handlers::notification::get_notification)
                .delete(handlers::notification::delete_notification),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/notifications/{id}/archive",
            put(handlers::notification::archive),
        )
}

/// UI preferences
fn preference_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/preferences",
            get(handlers::preferences::get_preferences).delete(handlers::preferences::reset),
        )
        .route("/preferences/theme", put(handlers::preferences::set_theme))
        .route(
            "/preferences/sidebar",
            put(handlers::preferences::update_sidebar),
        )
        .route(
            "/preferences/sidebar/toggle",
            post(handlers::preferences::toggle_sidebar),
        )
        .route(
            "/preferences/favorites",
            post(handlers::preferences::add_favorite)
                .delete(handlers::preferences::remove_favorite),
        )
        .route(
            "/preferences/profile",
            put(handlers::preferences::set_profile).delete(handlers::preferences::clear_profile),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Edge functions
fn function_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/ai-assistant",
            post(handlers::assistant::run).options(handlers::assistant::preflight),
        )
        .layer(CorsLayer::permissive())
}
