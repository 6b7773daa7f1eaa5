//! Notification store port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use edilhub_core::error::AppError;
use edilhub_core::result::AppResult;
use edilhub_entity::notification::{NewNotification, Notification};

/// Persistent source of truth for workflow notifications.
///
/// Missing records are reported as `NotFound`, version mismatches as
/// `Conflict`. Any other failure is a transport error of the backing store.
#[async_trait]
pub trait NotificationStore: Send + Sync + std::fmt::Debug + 'static {
    /// The `limit` most recent notifications, newest first.
    async fn list_recent(&self, limit: usize) -> AppResult<Vec<Notification>>;

    /// A single notification by id.
    async fn get(&self, id: Uuid) -> AppResult<Option<Notification>>;

    /// Persist a new unread notification.
    async fn insert(&self, new: NewNotification) -> AppResult<Notification>;

    /// `non_letta → letta`. A no-op on read or archived records.
    async fn mark_read(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
        expected_version: Option<i64>,
    ) -> AppResult<Notification>;

    /// Mark every unread record as read. Returns the number changed.
    async fn mark_all_read(&self, now: DateTime<Utc>) -> AppResult<u64>;

    /// Move a record to `archiviata` from any state.
    async fn archive(&self, id: Uuid, expected_version: Option<i64>) -> AppResult<Notification>;

    /// Remove a record permanently.
    async fn delete(&self, id: Uuid, expected_version: Option<i64>) -> AppResult<()>;

    /// Check that the store is reachable.
    async fn health_check(&self) -> AppResult<()>;
}

/// Reject the write when the caller saw an older version of the record.
pub fn check_version(current: &Notification, expected: Option<i64>) -> AppResult<()> {
    match expected {
        Some(v) if v != current.version => Err(AppError::conflict(format!(
            "Notification {} has version {}, expected {v}",
            current.id, current.version
        ))),
        _ => Ok(()),
    }
}

/// The error returned for an unknown notification id.
pub fn not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("Notification {id} not found"))
}
