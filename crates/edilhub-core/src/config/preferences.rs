//! UI preference persistence configuration.

use serde::{Deserialize, Serialize};

/// Where UI preferences are persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// Path of the JSON key-value file, or `memory://` to keep them in process.
    #[serde(default = "default_path")]
    pub path: String,
}

impl PreferencesConfig {
    /// Whether preferences are kept in memory only.
    pub fn is_memory(&self) -> bool {
        self.path.starts_with("memory://")
    }
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> String {
    "data/preferences.json".to_string()
}
