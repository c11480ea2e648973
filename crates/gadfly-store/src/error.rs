use gadfly_domain::DomainError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A document exists but cannot be parsed
    #[error("Corrupt document at {}: {source}", path.display())]
    Corrupt {
        /// File that failed to parse
        path: PathBuf,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// A document could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Input rejected before any mutation
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
