//! Notification lifecycle state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use edilhub_core::AppError;

/// Lifecycle state of a notification.
///
/// Transitions only move forward: `NonLetta → Letta → Archiviata`, or
/// straight from `NonLetta` to `Archiviata`. Nothing returns to `NonLetta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_state", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationState {
    /// Not yet read.
    #[default]
    NonLetta,
    /// Read by the user.
    Letta,
    /// Archived; hidden from the default feed.
    Archiviata,
}

impl NotificationState {
    /// Return the state as its stored tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonLetta => "non_letta",
            Self::Letta => "letta",
            Self::Archiviata => "archiviata",
        }
    }

    /// Whether a record may move from this state to `target`.
    pub fn can_transition_to(&self, target: Self) -> bool {
        match (self, target) {
            (Self::NonLetta, Self::Letta) => true,
            (_, Self::Archiviata) => true,
            (a, b) => *a == b,
        }
    }
}

impl fmt::Display for NotificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "non_letta" => Ok(Self::NonLetta),
            "letta" => Ok(Self::Letta),
            "archiviata" => Ok(Self::Archiviata),
            _ => Err(AppError::validation(format!(
                "Invalid notification state: '{s}'. Expected one of: non_letta, letta, archiviata"
            ))),
        }
    }
}
