//! Notification feed configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Feed size and refresh cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Number of most recent notifications kept in the feed.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Upper bound accepted for a caller-supplied limit.
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    /// Poll interval in milliseconds; also the cached feed's time-to-live.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

impl FeedConfig {
    /// The poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Reject values that would stall the poller or empty every feed.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.poll_interval_ms == 0 {
            return Err(AppError::configuration(
                "feed.poll_interval_ms must be greater than zero",
            ));
        }
        if self.limit == 0 || self.max_limit == 0 {
            return Err(AppError::configuration(
                "feed.limit and feed.max_limit must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            max_limit: default_max_limit(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

fn default_limit() -> usize {
    50
}

fn default_max_limit() -> usize {
    200
}

fn default_poll_interval() -> u64 {
    30_000
}
