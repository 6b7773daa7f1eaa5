//! UI preference entities.

pub mod model;
pub mod theme;

pub use model::{Favorite, SidebarState, UiPreferences, UserProfile};
pub use theme::{Density, ThemeMode, ThemeSettings};
