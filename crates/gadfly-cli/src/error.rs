//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Exit code for an audit that found expired facts.
pub const EXIT_AUDIT_FAILED: i32 = 2;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Domain rule violation
    #[error(transparent)]
    Domain(#[from] gadfly_domain::DomainError),

    /// Store failure
    #[error(transparent)]
    Store(#[from] gadfly_store::StoreError),

    /// Coach failure
    #[error(transparent)]
    Coach(#[from] gadfly_coach::CoachError),

    /// Gatekeeper failure
    #[error(transparent)]
    Gatekeeper(#[from] gadfly_gatekeeper::GatekeeperError),

    /// Janitor failure
    #[error(transparent)]
    Janitor(#[from] gadfly_janitor::JanitorError),

    /// The audit gate found expired facts
    #[error("{expired} expired fact(s) need re-verification")]
    AuditFailed {
        /// How many facts had expired
        expired: usize,
        /// Rendered audit report, still printed on failure
        report: String,
    },
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::AuditFailed { .. } => EXIT_AUDIT_FAILED,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let failed = CliError::AuditFailed {
            expired: 3,
            report: String::new(),
        };
        assert_eq!(failed.exit_code(), 2);
        assert_eq!(CliError::InvalidInput("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_audit_message() {
        let message = CliError::AuditFailed {
            expired: 3,
            report: "table".to_string(),
        }
        .to_string();
        assert_eq!(message, "3 expired fact(s) need re-verification");
    }
}
