//! Error types for domain-level validation

use thiserror::Error;

/// Invalid input rejected before any state is touched
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Evidence tier outside 1..=5 or not a whole number
    #[error("Invalid evidence tier: {0} (expected an integer from 1 to 5)")]
    InvalidTier(String),

    /// Outcome score outside {0, 0.5, 1}
    #[error("Invalid outcome score: {0} (expected 0, 0.5 or 1)")]
    InvalidOutcome(f64),

    /// Unknown outcome or status label
    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    /// Confidence chain with no steps
    #[error("Confidence chain needs at least one score")]
    EmptyChain,

    /// Chain step outside [0, 100]
    #[error("Chain score at step {index} is out of range: {score}")]
    ChainScoreOutOfRange {
        /// Zero-based step index
        index: usize,
        /// Offending score
        score: f64,
    },

    /// Fact field missing or out of range
    #[error("Invalid fact field '{field}': {reason}")]
    InvalidFact {
        /// Field name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}
