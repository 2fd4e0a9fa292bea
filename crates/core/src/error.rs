// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Fetch(#[from] crate::port::FetchError),

    #[error(transparent)]
    Format(#[from] crate::domain::FormatError),
}

impl AppError {
    /// Fetch failed before any payload arrived
    pub fn is_unavailable(&self) -> bool {
        matches!(self, AppError::Fetch(e) if e.is_network())
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
