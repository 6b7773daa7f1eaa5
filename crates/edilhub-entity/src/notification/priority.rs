//! Notification priority.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use edilhub_core::AppError;

/// Ordinal priority of a notification: `Bassa < Media < Alta < Critica`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "notification_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low.
    Bassa,
    /// Medium.
    #[default]
    Media,
    /// High.
    Alta,
    /// Critical.
    Critica,
}

impl Priority {
    /// Whether this priority counts as high (`alta` or `critica`).
    pub fn is_high(&self) -> bool {
        *self >= Self::Alta
    }

    /// Return the priority as its stored tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bassa => "bassa",
            Self::Media => "media",
            Self::Alta => "alta",
            Self::Critica => "critica",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bassa" => Ok(Self::Bassa),
            "media" => Ok(Self::Media),
            "alta" => Ok(Self::Alta),
            "critica" => Ok(Self::Critica),
            _ => Err(AppError::validation(format!(
                "Invalid priority: '{s}'. Expected one of: bassa, media, alta, critica"
            ))),
        }
    }
}
