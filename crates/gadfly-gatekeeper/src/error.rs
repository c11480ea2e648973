//! Gatekeeper error types

use gadfly_domain::DomainError;
use thiserror::Error;

/// Errors that can occur during gatekeeper operations
#[derive(Error, Debug)]
pub enum GatekeeperError {
    /// Malformed input such as a fractional evidence tier
    #[error("Invalid input: {0}")]
    Domain(#[from] DomainError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
