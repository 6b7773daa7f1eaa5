//! # edilhub-entity
//!
//! Domain entity models for EdilHub. The workflow notification is a
//! database row and derives `sqlx::FromRow`; UI preferences are value
//! objects persisted as JSON documents.

pub mod notification;
pub mod preferences;
