//! Convenience result type alias for WordGrid.

use crate::error::AppError;

/// A specialized `Result` type for WordGrid operations.
pub type AppResult<T> = Result<T, AppError>;
