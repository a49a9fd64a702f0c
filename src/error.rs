// src/error.rs

use std::fmt;

/// Global application error enum.
/// Centralizes the error kinds the engine signals to its callers.
#[derive(Debug)]
pub enum AppError {
    /// Referenced exam or question does not exist (or is not published).
    NotFound(String),

    /// An attempt already exists for the (student, exam) pair.
    AlreadyGraded(String),

    /// Malformed authoring or submission data, rejected before any state change.
    InvalidInput(String),

    /// Failure reported by a store backend.
    Store(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Converts draft validation failures into `InvalidInput`.
/// Allows using the `?` operator after `validate()`.
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
