//! Coach error types

use gadfly_domain::DomainError;
use thiserror::Error;

/// Errors that can occur while coaching
#[derive(Error, Debug)]
pub enum CoachError {
    /// Profile store failure
    #[error("Store error: {0}")]
    Store(String),

    /// Invalid outcome score or other malformed input
    #[error("Invalid input: {0}")]
    Domain(#[from] DomainError),

    /// Declared rating outside [0, 1000]
    #[error("Declared rating must be between 0 and 1000, got {0}")]
    InvalidRating(f64),
}
