//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use edilhub_entity::notification::Notification;
use edilhub_service::notification::{FeedCounts, FeedFilter, NotificationDisplay, describe};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A notification with its display attributes.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    /// The stored record.
    #[serde(flatten)]
    pub notification: Notification,
    /// Icon, color, and labels.
    pub display: NotificationDisplay,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        let display = describe(&notification);
        Self {
            notification,
            display,
        }
    }
}

/// Filtered feed.
#[derive(Debug, Clone, Serialize)]
pub struct FeedResponse {
    /// Selection applied.
    pub filter: FeedFilter,
    /// Matching notifications, newest first.
    pub notifications: Vec<NotificationResponse>,
    /// Counts over the whole unfiltered feed.
    pub counts: FeedCounts,
    /// Set when the store could not be reached and an older feed is served.
    pub stale: bool,
    /// When the feed was read from the store.
    pub fetched_at: DateTime<Utc>,
}

/// Count response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// The count.
    pub count: u64,
}

/// Result of a bulk mark-as-read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkedResponse {
    /// Records changed.
    pub marked: u64,
}

/// Generic message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Result of a toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleResponse {
    /// State after the toggle.
    pub value: bool,
}

/// Basic health check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}

/// Detailed health check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Notification store status.
    pub store: String,
    /// Whether the AI assistant has an API key.
    pub assistant_configured: bool,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}

/// Successful AI assistant reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantResponse {
    /// Always `true`.
    pub success: bool,
    /// Extracted result.
    pub result: serde_json::Value,
}

/// Failed AI assistant reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantErrorResponse {
    /// User-facing message.
    pub error: String,
}
