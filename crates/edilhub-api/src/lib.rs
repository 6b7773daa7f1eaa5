//! # edilhub-api
//!
//! HTTP API layer for EdilHub built on Axum.
//!
//! Exposes the notification feed and transitions, the UI preference
//! store, the AI assistant function, and health checks.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
