//! Workflow notification entities.

pub mod kind;
pub mod model;
pub mod priority;
pub mod state;

pub use kind::{EntityKind, NotificationKind};
pub use model::{NewNotification, Notification};
pub use priority::Priority;
pub use state::NotificationState;
