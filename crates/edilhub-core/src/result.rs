//! Convenience result type alias for EdilHub.

use crate::error::AppError;

/// A specialized `Result` type for EdilHub operations.
pub type AppResult<T> = Result<T, AppError>;
