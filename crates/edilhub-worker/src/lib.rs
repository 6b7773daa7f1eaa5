//! # edilhub-worker
//!
//! Timer-driven background refresh of the notification feed. Each
//! consumer holds a [`FeedSubscription`]; releasing or dropping it stops
//! the refresh task.

pub mod poller;

pub use poller::{FeedPoller, FeedSubscription, MIN_INTERVAL};
