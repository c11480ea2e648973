//! Error types for Janitor operations

use thiserror::Error;

/// Errors that can occur during Janitor operations
#[derive(Error, Debug)]
pub enum JanitorError {
    /// Knowledge graph failure
    #[error("Knowledge graph error: {0}")]
    Graph(String),

    /// Rating store failure
    #[error("Rating store error: {0}")]
    Ratings(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
