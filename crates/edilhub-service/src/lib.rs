//! # edilhub-service
//!
//! Business logic service layer for EdilHub. Services receive their
//! collaborators at construction time as `Arc` references and never reach
//! for global state.

pub mod assistant;
pub mod notification;
pub mod preferences;

pub use assistant::AssistantService;
pub use notification::{FeedController, FeedFilter, NotificationService};
pub use preferences::PreferenceStore;
