//! # edilhub-core
//!
//! Core crate for the EdilHub workflow notification center. Contains the
//! configuration schemas, the key-value persistence port, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other EdilHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
