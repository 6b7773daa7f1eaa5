//! Notification feed controller.
//!
//! Serves the most recent notifications from a short-lived cache whose
//! time-to-live equals the poll interval. A failed refresh falls back to
//! the last snapshot that was fetched successfully, flagged as stale.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use serde::Serialize;
use tracing::{debug, warn};

use edilhub_core::config::feed::FeedConfig;
use edilhub_core::error::{AppError, ErrorKind};
use edilhub_core::result::AppResult;
use edilhub_database::store::NotificationStore;
use edilhub_entity::notification::Notification;

/// Distinct limits kept in the cache at once.
const MAX_CACHED_LIMITS: u64 = 16;

#[derive(Debug, Clone)]
struct Snapshot {
    notifications: Arc<Vec<Notification>>,
    fetched_at: DateTime<Utc>,
}

impl Snapshot {
    fn new(notifications: Vec<Notification>) -> Self {
        Self {
            notifications: Arc::new(notifications),
            fetched_at: Utc::now(),
        }
    }

    fn view(&self, stale: bool) -> FeedView {
        FeedView {
            notifications: self.notifications.as_ref().clone(),
            fetched_at: self.fetched_at,
            stale,
        }
    }
}

/// A feed as served to callers.
#[derive(Debug, Clone, Serialize)]
pub struct FeedView {
    /// Notifications, newest first.
    pub notifications: Vec<Notification>,
    /// When the notifications were read from the store.
    pub fetched_at: DateTime<Utc>,
    /// Set when the latest refresh failed and an older snapshot is served.
    pub stale: bool,
}

/// Cached, failure-tolerant view over the notification store.
#[derive(Debug)]
pub struct FeedController {
    store: Arc<dyn NotificationStore>,
    cache: Cache<usize, Snapshot>,
    last_good: Cache<usize, Snapshot>,
    generation: AtomicU64,
    default_limit: usize,
    max_limit: usize,
    poll_interval: Duration,
}

impl FeedController {
    /// Create a controller over `store`.
    pub fn new(store: Arc<dyn NotificationStore>, config: &FeedConfig) -> Self {
        let poll_interval = config.poll_interval();
        Self {
            store,
            cache: Cache::builder()
                .max_capacity(MAX_CACHED_LIMITS)
                .time_to_live(poll_interval)
                .build(),
            last_good: Cache::builder().max_capacity(MAX_CACHED_LIMITS).build(),
            generation: AtomicU64::new(0),
            default_limit: config.limit,
            max_limit: config.max_limit.max(1),
            poll_interval,
        }
    }

    /// Feed size used when the caller does not pick one.
    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Interval between background refreshes.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Clamp a caller-supplied limit into the accepted range.
    pub fn resolve_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit)
    }

    /// Read the `limit` most recent notifications straight from the store.
    ///
    /// Store failures are reported as `Fetch` errors. There is no retry.
    pub async fn fetch_feed(&self, limit: usize) -> AppResult<Vec<Notification>> {
        self.store.list_recent(limit).await.map_err(|e| {
            warn!(limit, error = %e, "Notification feed fetch failed");
            AppError::with_source(ErrorKind::Fetch, "Failed to fetch notification feed", e)
        })
    }

    /// Fetch and replace the cached snapshot for `limit`.
    ///
    /// On failure the previous snapshots are kept untouched. A snapshot
    /// fetched across an [`invalidate`](Self::invalidate) is returned but
    /// not cached.
    pub async fn refresh(&self, limit: usize) -> AppResult<FeedView> {
        let generation = self.generation.load(Ordering::SeqCst);
        let snapshot = Snapshot::new(self.fetch_feed(limit).await?);

        if self.generation.load(Ordering::SeqCst) == generation {
            self.cache.insert(limit, snapshot.clone()).await;
            self.last_good.insert(limit, snapshot.clone()).await;
        }

        debug!(limit, count = snapshot.notifications.len(), "Notification feed refreshed");
        Ok(snapshot.view(false))
    }

    /// Serve the feed for `limit`.
    ///
    /// Returns the cached snapshot while it is fresh, otherwise refreshes.
    /// If the refresh fails and an earlier snapshot exists it is returned
    /// with `stale = true`; otherwise the `Fetch` error propagates.
    pub async fn feed(&self, limit: usize) -> AppResult<FeedView> {
        if let Some(snapshot) = self.cache.get(&limit).await {
            return Ok(snapshot.view(false));
        }

        match self.refresh(limit).await {
            Ok(view) => Ok(view),
            Err(e) => match self.last_good.get(&limit).await {
                Some(snapshot) => {
                    warn!(limit, fetched_at = %snapshot.fetched_at, "Serving stale notification feed");
                    Ok(snapshot.view(true))
                }
                None => Err(e),
            },
        }
    }

    /// Drop every cached snapshot so the next read goes to the store.
    ///
    /// Last-known-good snapshots are kept for failure fallback.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cache.invalidate_all();
        debug!("Notification feed invalidated");
    }
}
