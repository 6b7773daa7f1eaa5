//! Explicit UI preference store over an injected key-value port.
//!
//! Loaded once at startup and shared as `Arc<PreferenceStore>`. Every
//! mutation is written through to the port before it becomes visible,
//! so after a failed write the in-memory state still matches the port.

use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use edilhub_core::result::AppResult;
use edilhub_core::traits::KeyValueStore;
use edilhub_entity::preferences::{Favorite, ThemeSettings, UiPreferences, UserProfile};

/// Persisted sections of [`UiPreferences`], one key each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Theme,
    Sidebar,
    Favorites,
    Profile,
}

impl Section {
    const ALL: [Self; 4] = [Self::Theme, Self::Sidebar, Self::Favorites, Self::Profile];

    fn key(&self) -> &'static str {
        match self {
            Self::Theme => "ui.theme",
            Self::Sidebar => "ui.sidebar",
            Self::Favorites => "ui.favorites",
            Self::Profile => "ui.profile",
        }
    }

    /// Serialized section value; `None` means the key is removed.
    fn encode(&self, prefs: &UiPreferences) -> AppResult<Option<String>> {
        let json = match self {
            Self::Theme => serde_json::to_string(&prefs.theme)?,
            Self::Sidebar => serde_json::to_string(&prefs.sidebar)?,
            Self::Favorites => serde_json::to_string(&prefs.favorites)?,
            Self::Profile => match &prefs.profile {
                Some(profile) => serde_json::to_string(profile)?,
                None => return Ok(None),
            },
        };
        Ok(Some(json))
    }

    /// Restore this section of `prefs` to its default.
    fn clear(&self, prefs: &mut UiPreferences) {
        let defaults = UiPreferences::default();
        match self {
            Self::Theme => prefs.theme = defaults.theme,
            Self::Sidebar => prefs.sidebar = defaults.sidebar,
            Self::Favorites => prefs.favorites = defaults.favorites,
            Self::Profile => prefs.profile = defaults.profile,
        }
    }
}

/// Application-wide UI configuration.
#[derive(Debug)]
pub struct PreferenceStore {
    port: Arc<dyn KeyValueStore>,
    state: RwLock<UiPreferences>,
}

impl PreferenceStore {
    /// Read every section from `port`. Unreadable sections fall back to
    /// their defaults.
    pub async fn load(port: Arc<dyn KeyValueStore>) -> AppResult<Self> {
        let prefs = UiPreferences {
            theme: read_section(port.as_ref(), Section::Theme).await?.unwrap_or_default(),
            sidebar: read_section(port.as_ref(), Section::Sidebar).await?.unwrap_or_default(),
            favorites: read_section(port.as_ref(), Section::Favorites)
                .await?
                .unwrap_or_default(),
            profile: read_section(port.as_ref(), Section::Profile).await?,
        };
        debug!(favorites = prefs.favorites.len(), "UI preferences loaded");

        Ok(Self {
            port,
            state: RwLock::new(prefs),
        })
    }

    /// Current preferences.
    pub async fn snapshot(&self) -> UiPreferences {
        self.state.read().await.clone()
    }

    /// Replace the theme.
    pub async fn set_theme(&self, theme: ThemeSettings) -> AppResult<()> {
        self.update(Section::Theme, |p| p.theme = theme).await
    }

    /// Show or hide the sidebar.
    pub async fn set_sidebar_visible(&self, visible: bool) -> AppResult<()> {
        self.update(Section::Sidebar, |p| p.sidebar.visible = visible)
            .await
    }

    /// Flip sidebar visibility. Returns the new visibility.
    pub async fn toggle_sidebar(&self) -> AppResult<bool> {
        self.update(Section::Sidebar, |p| {
            p.sidebar.visible = !p.sidebar.visible;
            p.sidebar.visible
        })
        .await
    }

    /// Collapse or expand a sidebar section. Returns whether it is now collapsed.
    pub async fn toggle_section(&self, section: &str) -> AppResult<bool> {
        self.update(Section::Sidebar, |p| p.sidebar.toggle_section(section))
            .await
    }

    /// Pin `path`. Returns `false` if it was already pinned.
    pub async fn add_favorite(&self, path: &str, label: &str) -> AppResult<bool> {
        if self.is_favorite(path).await {
            return Ok(false);
        }
        self.update(Section::Favorites, |p| {
            if p.is_favorite(path) {
                return false;
            }
            p.favorites.push(Favorite {
                path: path.to_string(),
                label: label.to_string(),
                added_at: Utc::now(),
            });
            true
        })
        .await
    }

    /// Unpin `path`. Returns `false` if it was not pinned.
    pub async fn remove_favorite(&self, path: &str) -> AppResult<bool> {
        if !self.is_favorite(path).await {
            return Ok(false);
        }
        self.update(Section::Favorites, |p| {
            let before = p.favorites.len();
            p.favorites.retain(|f| f.path != path);
            p.favorites.len() != before
        })
        .await
    }

    /// Check whether `path` is pinned.
    pub async fn is_favorite(&self, path: &str) -> bool {
        self.state.read().await.is_favorite(path)
    }

    /// Set the user profile.
    pub async fn set_profile(&self, profile: UserProfile) -> AppResult<()> {
        self.update(Section::Profile, |p| p.profile = Some(profile))
            .await
    }

    /// Remove the user profile.
    pub async fn clear_profile(&self) -> AppResult<()> {
        self.update(Section::Profile, |p| p.profile = None).await
    }

    /// Restore every section to its default and clear the port.
    ///
    /// Sections are cleared one key at a time. If a removal fails, the
    /// sections already removed stay at their defaults and the rest keep
    /// their values, matching what the port holds.
    pub async fn reset(&self) -> AppResult<()> {
        let mut state = self.state.write().await;
        for section in Section::ALL {
            if let Err(e) = self.port.remove(section.key()).await {
                warn!(key = section.key(), error = %e, "UI preference reset interrupted");
                return Err(e);
            }
            section.clear(&mut state);
        }
        debug!("UI preferences reset");
        Ok(())
    }

    /// Apply `f` to a copy of the state, persist `section`, then publish.
    async fn update<T>(
        &self,
        section: Section,
        f: impl FnOnce(&mut UiPreferences) -> T,
    ) -> AppResult<T> {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        let out = f(&mut next);

        match section.encode(&next)? {
            Some(json) => self.port.set(section.key(), &json).await?,
            None => self.port.remove(section.key()).await?,
        }

        *state = next;
        debug!(key = section.key(), "UI preference updated");
        Ok(out)
    }
}

async fn read_section<T: DeserializeOwned>(
    port: &dyn KeyValueStore,
    section: Section,
) -> AppResult<Option<T>> {
    let Some(raw) = port.get(section.key()).await? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(key = section.key(), error = %e, "Ignoring unreadable UI preference");
            Ok(None)
        }
    }
}
