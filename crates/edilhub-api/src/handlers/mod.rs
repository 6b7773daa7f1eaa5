//! Request handlers organized by domain.

pub mod assistant;
pub mod health;
pub mod notification;
pub mod preferences;
