//! Notification state transitions and producer entry point.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use edilhub_core::error::{AppError, ErrorKind};
use edilhub_core::result::AppResult;
use edilhub_database::store::NotificationStore;
use edilhub_entity::notification::{NewNotification, Notification};

use super::feed::FeedController;
use super::filter::FeedCounts;

/// Applies state transitions to notifications.
///
/// A transition is only reflected locally (by invalidating the cached
/// feed) after the store confirms it. Store failures surface as
/// `Mutation` errors; missing records and stale versions pass through.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification store.
    store: Arc<dyn NotificationStore>,
    /// Feed invalidated after every confirmed transition.
    feed: Arc<FeedController>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(store: Arc<dyn NotificationStore>, feed: Arc<FeedController>) -> Self {
        Self { store, feed }
    }

    /// The feed controller this service invalidates.
    pub fn feed(&self) -> &Arc<FeedController> {
        &self.feed
    }

    /// Gets a single notification.
    pub async fn get(&self, id: Uuid) -> AppResult<Notification> {
        self.store
            .get(id)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Fetch, "Failed to load notification", e))?
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))
    }

    /// Counts unread notifications in the default-size feed.
    ///
    /// This is the badge shown next to the feed, so it only covers the
    /// `feed.limit` most recent records. Older unread records outside that
    /// window are not counted.
    pub async fn unread_count(&self) -> AppResult<usize> {
        let view = self.feed.feed(self.feed.default_limit()).await?;
        Ok(FeedCounts::of(&view.notifications).unread)
    }

    /// Marks a notification as read. Repeating it is a no-op.
    pub async fn mark_as_read(
        &self,
        id: Uuid,
        expected_version: Option<i64>,
    ) -> AppResult<Notification> {
        let n = self
            .store
            .mark_read(id, Utc::now(), expected_version)
            .await
            .map_err(mutation_error("mark notification as read"))?;

        self.feed.invalidate();
        info!(notification_id = %id, stato = %n.stato, version = n.version, "Notification marked as read");
        Ok(n)
    }

    /// Marks every unread notification as read. Returns how many changed.
    pub async fn mark_all_as_read(&self) -> AppResult<u64> {
        let count = self
            .store
            .mark_all_read(Utc::now())
            .await
            .map_err(mutation_error("mark all notifications as read"))?;

        self.feed.invalidate();
        info!(count, "All notifications marked as read");
        Ok(count)
    }

    /// Archives a notification from any state.
    pub async fn archive(&self, id: Uuid, expected_version: Option<i64>) -> AppResult<Notification> {
        let n = self
            .store
            .archive(id, expected_version)
            .await
            .map_err(mutation_error("archive notification"))?;

        self.feed.invalidate();
        info!(notification_id = %id, version = n.version, "Notification archived");
        Ok(n)
    }

    /// Permanently deletes a notification.
    pub async fn delete(&self, id: Uuid, expected_version: Option<i64>) -> AppResult<()> {
        self.store
            .delete(id, expected_version)
            .await
            .map_err(mutation_error("delete notification"))?;

        self.feed.invalidate();
        info!(notification_id = %id, "Notification deleted");
        Ok(())
    }

    /// Stores a notification emitted by a workflow producer.
    pub async fn publish(&self, new: NewNotification) -> AppResult<Notification> {
        if new.titolo.trim().is_empty() {
            return Err(AppError::validation("Notification title must not be empty"));
        }
        if new.entita_id.trim().is_empty() {
            return Err(AppError::validation("Notification entity id must not be empty"));
        }

        let n = self
            .store
            .insert(new)
            .await
            .map_err(mutation_error("publish notification"))?;

        self.feed.invalidate();
        info!(
            notification_id = %n.id,
            tipo = %n.tipo,
            entita_tipo = %n.entita_tipo,
            priorita = %n.priorita,
            "Notification published"
        );
        Ok(n)
    }
}

/// Re-tag store failures as `Mutation`, passing caller errors through.
fn mutation_error(action: &'static str) -> impl FnOnce(AppError) -> AppError {
    move |e| {
        if e.is_caller_error() {
            return e;
        }
        warn!(error = %e, "Failed to {action}");
        AppError::with_source(ErrorKind::Mutation, format!("Failed to {action}"), e)
    }
}
