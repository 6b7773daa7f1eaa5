//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use edilhub_core::error::AppError;
use edilhub_entity::notification::{EntityKind, NewNotification, NotificationKind, Priority};
use edilhub_entity::preferences::UserProfile;

/// Run `validator` checks, mapping failures to a `Validation` error.
pub fn validated<T: Validate>(req: T) -> Result<T, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))?;
    Ok(req)
}

/// Query parameters of the feed endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedQuery {
    /// `all`, `unread`, or `high_priority`. Defaults to `all`.
    pub filter: Option<String>,
    /// Number of most recent notifications to consider.
    pub limit: Option<usize>,
}

/// Optional lost-update guard for single-record mutations.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VersionQuery {
    /// Version the caller last saw.
    pub expected_version: Option<i64>,
}

/// Notification emitted by a workflow producer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PublishNotificationRequest {
    /// Workflow event type.
    pub tipo: NotificationKind,
    /// Kind of the referenced business document.
    pub entita_tipo: EntityKind,
    /// Reference to the business document.
    #[validate(length(min = 1, max = 100))]
    pub entita_id: String,
    /// Short title.
    #[validate(length(min = 1, max = 200))]
    pub titolo: String,
    /// Body text.
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub messaggio: String,
    /// Priority. Defaults to `media`.
    #[serde(default)]
    pub priorita: Priority,
    /// Suggested next step.
    #[serde(default)]
    #[validate(length(max = 200))]
    pub azione_suggerita: Option<String>,
    /// App-relative path for the suggested action.
    #[serde(default)]
    #[validate(length(max = 500))]
    pub link_azione: Option<String>,
}

impl From<PublishNotificationRequest> for NewNotification {
    fn from(req: PublishNotificationRequest) -> Self {
        Self {
            tipo: req.tipo,
            entita_tipo: req.entita_tipo,
            entita_id: req.entita_id,
            titolo: req.titolo,
            messaggio: req.messaggio,
            priorita: req.priorita,
            azione_suggerita: req.azione_suggerita,
            link_azione: req.link_azione,
        }
    }
}

/// Sidebar update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SidebarRequest {
    /// Show or hide the sidebar.
    pub visible: Option<bool>,
    /// Section to collapse or expand.
    pub toggle_section: Option<String>,
}

/// Favorite to pin.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddFavoriteRequest {
    /// App-relative path.
    #[validate(length(min = 1, max = 500))]
    pub path: String,
    /// Display label.
    #[validate(length(min = 1, max = 100))]
    pub label: String,
}

/// Favorite to unpin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveFavoriteQuery {
    /// App-relative path.
    pub path: String,
}

/// Profile update.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100))]
    pub display_name: String,
    /// Job role.
    #[serde(default)]
    #[validate(length(max = 100))]
    pub role: String,
    /// Contact email.
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
    /// Avatar image URL.
    #[serde(default)]
    #[validate(url)]
    pub avatar_url: Option<String>,
}

impl From<ProfileRequest> for UserProfile {
    fn from(req: ProfileRequest) -> Self {
        Self {
            display_name: req.display_name,
            role: req.role,
            email: req.email,
            avatar_url: req.avatar_url,
        }
    }
}
