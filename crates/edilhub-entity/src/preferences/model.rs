//! UI preference aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::theme::ThemeSettings;

/// Sidebar visibility and collapsed groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarState {
    /// Whether the sidebar is shown.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Names of collapsed sidebar sections.
    #[serde(default)]
    pub collapsed_sections: Vec<String>,
}

impl SidebarState {
    /// Collapse `section` if expanded, expand it otherwise.
    ///
    /// Returns whether the section is now collapsed.
    pub fn toggle_section(&mut self, section: &str) -> bool {
        if let Some(pos) = self.collapsed_sections.iter().position(|s| s == section) {
            self.collapsed_sections.remove(pos);
            false
        } else {
            self.collapsed_sections.push(section.to_string());
            true
        }
    }
}

impl Default for SidebarState {
    fn default() -> Self {
        Self {
            visible: true,
            collapsed_sections: Vec::new(),
        }
    }
}

/// A pinned app location. Unique by `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    /// App-relative path.
    pub path: String,
    /// Display label.
    pub label: String,
    /// When the favorite was added.
    pub added_at: DateTime<Utc>,
}

/// Signed-in user's display profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Name shown in the shell header.
    pub display_name: String,
    /// Job role (e.g. "Capocantiere").
    #[serde(default)]
    pub role: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Complete UI configuration of the application shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Theme.
    #[serde(default)]
    pub theme: ThemeSettings,
    /// Sidebar.
    #[serde(default)]
    pub sidebar: SidebarState,
    /// Pinned locations, most recently added last.
    #[serde(default)]
    pub favorites: Vec<Favorite>,
    /// User profile, if one has been set.
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

impl UiPreferences {
    /// Check whether `path` is pinned.
    pub fn is_favorite(&self, path: &str) -> bool {
        self.favorites.iter().any(|f| f.path == path)
    }
}

fn default_true() -> bool {
    true
}
