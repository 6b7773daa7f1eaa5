//! Notification type and business-entity enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use edilhub_core::AppError;

/// The workflow event that produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// A document was converted into the next one in its chain.
    Conversione,
    /// A deadline is approaching.
    Scadenza,
    /// Something needs attention.
    Alert,
    /// A document is waiting for approval.
    Approvazione,
}

impl NotificationKind {
    /// All kinds in display order.
    pub const ALL: [Self; 4] = [
        Self::Conversione,
        Self::Scadenza,
        Self::Alert,
        Self::Approvazione,
    ];

    /// Return the kind as its stored tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conversione => "conversione",
            Self::Scadenza => "scadenza",
            Self::Alert => "alert",
            Self::Approvazione => "approvazione",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conversione" => Ok(Self::Conversione),
            "scadenza" => Ok(Self::Scadenza),
            "alert" => Ok(Self::Alert),
            "approvazione" => Ok(Self::Approvazione),
            _ => Err(AppError::validation(format!(
                "Invalid notification kind: '{s}'. Expected one of: conversione, scadenza, alert, approvazione"
            ))),
        }
    }
}

/// The kind of business document a notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "entity_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Quote.
    Preventivo,
    /// Order.
    Ordine,
    /// Delivery note.
    Ddt,
    /// Invoice.
    Fattura,
    /// Any other document.
    Documento,
}

impl EntityKind {
    /// All entity kinds in document-chain order.
    pub const ALL: [Self; 5] = [
        Self::Preventivo,
        Self::Ordine,
        Self::Ddt,
        Self::Fattura,
        Self::Documento,
    ];

    /// Return the entity kind as its stored tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preventivo => "preventivo",
            Self::Ordine => "ordine",
            Self::Ddt => "ddt",
            Self::Fattura => "fattura",
            Self::Documento => "documento",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preventivo" => Ok(Self::Preventivo),
            "ordine" => Ok(Self::Ordine),
            "ddt" => Ok(Self::Ddt),
            "fattura" => Ok(Self::Fattura),
            "documento" => Ok(Self::Documento),
            _ => Err(AppError::validation(format!(
                "Invalid entity kind: '{s}'. Expected one of: preventivo, ordine, ddt, fattura, documento"
            ))),
        }
    }
}
