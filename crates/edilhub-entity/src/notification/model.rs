//! Workflow notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::{EntityKind, NotificationKind};
use super::priority::Priority;
use super::state::NotificationState;

/// A workflow event surfaced to the user.
///
/// Field names match the `workflow_notifications` table and the JSON
/// wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// Workflow event type.
    pub tipo: NotificationKind,
    /// Kind of the referenced business document.
    pub entita_tipo: EntityKind,
    /// Opaque reference to the business document.
    pub entita_id: String,
    /// Short title.
    pub titolo: String,
    /// Body text.
    pub messaggio: String,
    /// Priority.
    pub priorita: Priority,
    /// Lifecycle state.
    pub stato: NotificationState,
    /// Suggested next step, if any.
    pub azione_suggerita: Option<String>,
    /// App-relative path for the suggested action.
    pub link_azione: Option<String>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// When the notification was first read.
    pub letta_at: Option<DateTime<Utc>>,
    /// Row version, bumped by every successful mutation.
    pub version: i64,
}

impl Notification {
    /// Build a fresh unread record from a producer payload.
    pub fn create(new: NewNotification, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tipo: new.tipo,
            entita_tipo: new.entita_tipo,
            entita_id: new.entita_id,
            titolo: new.titolo,
            messaggio: new.messaggio,
            priorita: new.priorita,
            stato: NotificationState::NonLetta,
            azione_suggerita: new.azione_suggerita,
            link_azione: new.link_azione,
            created_at: now,
            letta_at: None,
            version: 1,
        }
    }

    /// Move `non_letta` to `letta` and stamp `letta_at`.
    ///
    /// Returns `false` (and changes nothing) when the record is already
    /// read or archived.
    pub fn mark_read(&mut self, now: DateTime<Utc>) -> bool {
        if self.stato != NotificationState::NonLetta {
            return false;
        }
        self.stato = NotificationState::Letta;
        self.letta_at = Some(now);
        self.version += 1;
        true
    }

    /// Move the record to `archiviata`. `letta_at` is kept as is.
    ///
    /// Returns `false` when the record was already archived.
    pub fn archive(&mut self) -> bool {
        if self.stato == NotificationState::Archiviata {
            return false;
        }
        self.stato = NotificationState::Archiviata;
        self.version += 1;
        true
    }

    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        self.stato == NotificationState::NonLetta
    }

    /// Check if the notification has been archived.
    pub fn is_archived(&self) -> bool {
        self.stato == NotificationState::Archiviata
    }

    /// Unread and `alta` or `critica`.
    pub fn is_high_priority(&self) -> bool {
        self.is_unread() && self.priorita.is_high()
    }
}

/// Payload accepted from external producers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// Workflow event type.
    pub tipo: NotificationKind,
    /// Kind of the referenced business document.
    pub entita_tipo: EntityKind,
    /// Opaque reference to the business document.
    pub entita_id: String,
    /// Short title.
    pub titolo: String,
    /// Body text.
    #[serde(default)]
    pub messaggio: String,
    /// Priority.
    #[serde(default)]
    pub priorita: Priority,
    /// Suggested next step.
    #[serde(default)]
    pub azione_suggerita: Option<String>,
    /// App-relative path for the suggested action.
    #[serde(default)]
    pub link_azione: Option<String>,
}
