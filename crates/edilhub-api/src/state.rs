//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use edilhub_core::config::AppConfig;
use edilhub_database::store::NotificationStore;
use edilhub_service::assistant::AssistantService;
use edilhub_service::notification::{FeedController, NotificationService};
use edilhub_service::preferences::PreferenceStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Process start, for uptime reporting
    pub started_at: Instant,

    // ── Infrastructure ───────────────────────────────────────
    /// Notification store (PostgreSQL or in-memory)
    pub store: Arc<dyn NotificationStore>,

    // ── Services ─────────────────────────────────────────────
    /// Cached notification feed
    pub feed: Arc<FeedController>,
    /// Notification state transitions
    pub notification_service: Arc<NotificationService>,
    /// AI assistant proxy
    pub assistant_service: Arc<AssistantService>,
    /// UI preference store
    pub preferences: Arc<PreferenceStore>,
}

impl AppState {
    /// Wire services over `store` and `preferences`.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn NotificationStore>,
        preferences: Arc<PreferenceStore>,
    ) -> Self {
        let feed = Arc::new(FeedController::new(Arc::clone(&store), &config.feed));
        let notification_service = Arc::new(NotificationService::new(
            Arc::clone(&store),
            Arc::clone(&feed),
        ));
        let assistant_service = Arc::new(AssistantService::new(config.assistant.clone()));

        Self {
            config: Arc::new(config),
            started_at: Instant::now(),
            store,
            feed,
            notification_service,
            assistant_service,
            preferences,
        }
    }
}
