//! Workflow notification feed, filters, transitions, and display mapping.

pub mod feed;
pub mod filter;
pub mod presentation;
pub mod service;

pub use feed::{FeedController, FeedView};
pub use filter::{FeedCounts, FeedFilter, filter};
pub use presentation::{NotificationDisplay, describe};
pub use service::NotificationService;
