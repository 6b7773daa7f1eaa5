//! Feed poller and subscription handles.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use edilhub_core::error::AppError;
use edilhub_core::result::AppResult;
use edilhub_service::notification::{FeedController, FeedView};

/// Shortest accepted poll interval.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Spawns refresh tasks over a [`FeedController`].
#[derive(Debug, Clone)]
pub struct FeedPoller {
    controller: Arc<FeedController>,
    interval: Duration,
    limit: usize,
}

impl FeedPoller {
    /// Create a poller refreshing `limit` notifications every `interval`.
    ///
    /// Intervals shorter than [`MIN_INTERVAL`] are raised to it.
    pub fn new(controller: Arc<FeedController>, interval: Duration, limit: usize) -> Self {
        if interval < MIN_INTERVAL {
            warn!(
                interval_ms = interval.as_millis() as u64,
                "Poll interval below minimum, clamping"
            );
        }
        Self {
            controller,
            interval: interval.max(MIN_INTERVAL),
            limit,
        }
    }

    /// Create a poller using the controller's configured interval and limit.
    pub fn with_defaults(controller: Arc<FeedController>) -> Self {
        let interval = controller.poll_interval();
        let limit = controller.default_limit();
        Self::new(controller, interval, limit)
    }

    /// Start a refresh task and return its handle.
    ///
    /// The task refreshes immediately, then every interval, and whenever
    /// [`FeedSubscription::nudge`] is called.
    pub fn subscribe(&self) -> FeedSubscription {
        let (feed_tx, feed_rx) = watch::channel(None);
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let nudge = Arc::new(Notify::new());

        let handle = tokio::spawn(run(
            Arc::clone(&self.controller),
            self.interval,
            self.limit,
            feed_tx,
            cancel_rx,
            Arc::clone(&nudge),
        ));

        info!(
            interval_ms = self.interval.as_millis() as u64,
            limit = self.limit,
            "Feed subscription started"
        );

        FeedSubscription {
            feed: feed_rx,
            cancel: cancel_tx,
            nudge,
            handle: Some(handle),
        }
    }
}

/// Handle to a running refresh task.
///
/// Dropping the handle signals the task to stop; [`release`](Self::release)
/// additionally waits for it to finish.
#[derive(Debug)]
pub struct FeedSubscription {
    feed: watch::Receiver<Option<FeedView>>,
    cancel: watch::Sender<bool>,
    nudge: Arc<Notify>,
    handle: Option<JoinHandle<()>>,
}

impl FeedSubscription {
    /// Wait for the next published feed.
    pub async fn changed(&mut self) -> AppResult<FeedView> {
        self.feed
            .changed()
            .await
            .map_err(|_| AppError::service_unavailable("Feed poller stopped"))?;
        self.feed
            .borrow_and_update()
            .clone()
            .ok_or_else(|| AppError::service_unavailable("Feed poller published no feed"))
    }

    /// The most recently published feed, if any.
    pub fn latest(&self) -> Option<FeedView> {
        self.feed.borrow().clone()
    }

    /// Request an immediate refresh.
    pub fn nudge(&self) {
        self.nudge.notify_one();
    }

    /// Whether the refresh task is still running.
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the refresh task and wait for it to exit.
    pub async fn release(mut self) {
        self.cancel.send_replace(true);
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "Feed poller task ended abnormally");
            }
        }
        debug!("Feed subscription released");
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        self.cancel.send_replace(true);
    }
}

async fn run(
    controller: Arc<FeedController>,
    interval: Duration,
    limit: usize,
    feed: watch::Sender<Option<FeedView>>,
    mut cancel: watch::Receiver<bool>,
    nudge: Arc<Notify>,
) {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.wait_for(|c| *c) => break,
            _ = nudge.notified() => ticker.reset(),
            _ = ticker.tick() => {}
        }

        let result = tokio::select! {
            biased;
            _ = cancel.wait_for(|c| *c) => break,
            result = controller.refresh(limit) => result,
        };

        if *cancel.borrow() || feed.is_closed() {
            debug!("Discarding feed refresh for released subscription");
            break;
        }

        match result {
            Ok(view) => {
                feed.send_replace(Some(view));
            }
            Err(e) => warn!(error = %e, "Feed poll failed, keeping previous snapshot"),
        }
    }

    debug!("Feed poller stopped");
}
