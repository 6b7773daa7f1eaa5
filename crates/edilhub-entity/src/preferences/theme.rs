//! Theme settings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use edilhub_core::AppError;

/// Light/dark mode selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// Follow the operating system.
    #[default]
    System,
}

impl ThemeMode {
    /// Return the mode as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            _ => Err(AppError::validation(format!(
                "Invalid theme mode: '{s}'. Expected one of: light, dark, system"
            ))),
        }
    }
}

/// Spacing density of lists and tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    /// Default spacing.
    #[default]
    Comfortable,
    /// Tight spacing.
    Compact,
}

/// Visual theme of the application shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSettings {
    /// Light/dark mode.
    #[serde(default)]
    pub mode: ThemeMode,
    /// Accent color name.
    #[serde(default = "default_accent")]
    pub accent: String,
    /// List density.
    #[serde(default)]
    pub density: Density,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            mode: ThemeMode::default(),
            accent: default_accent(),
            density: Density::default(),
        }
    }
}

fn default_accent() -> String {
    "orange".to_string()
}
