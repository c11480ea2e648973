//! Confidence chains - reliability of a conclusion reached in several steps
//!
//! A conclusion that depends on steps with confidence 80%, 80% and 80% is only
//! 51% reliable. The chain compounds step scores multiplicatively and warns when
//! the result should not be presented as firm.

use crate::error::DomainError;
use serde::Serialize;

/// Longest chain that does not warn about length
pub const MAX_CHAIN_STEPS: usize = 3;

/// Final score below which a conclusion is too weak to present as firm
pub const MIN_FIRM_SCORE: f64 = 60.0;

/// Which warning a chain carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainWarning {
    /// More than three steps; a direct source should be preferred
    TooLong,
    /// Final score below 60%
    TooWeak,
}

impl ChainWarning {
    /// Human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            ChainWarning::TooLong => {
                "Reasoning chain is too long (more than 3 steps); prefer a direct source"
            }
            ChainWarning::TooWeak => {
                "Final confidence is below 60%; present this as a hypothesis, not a conclusion"
            }
        }
    }
}

/// Result of compounding a chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainResult {
    /// Compounded confidence, rounded to a whole percentage
    pub final_score: f64,
    /// Number of steps
    pub steps: usize,
    /// At most one warning; length is checked before strength
    pub warning: Option<ChainWarning>,
}

/// Compound step scores (each in [0, 100]) into one confidence
///
/// # Examples
///
/// ```
/// use gadfly_domain::confidence::{chain, ChainWarning};
///
/// let result = chain(&[80.0, 80.0, 80.0]).unwrap();
/// assert_eq!(result.final_score, 51.0);
/// assert_eq!(result.warning, Some(ChainWarning::TooWeak));
///
/// assert!(chain(&[]).is_err());
/// ```
pub fn chain(scores: &[f64]) -> Result<ChainResult, DomainError> {
    if scores.is_empty() {
        return Err(DomainError::EmptyChain);
    }
    if let Some((index, &score)) = scores
        .iter()
        .enumerate()
        .find(|(_, s)| !s.is_finite() || !(0.0..=100.0).contains(*s))
    {
        return Err(DomainError::ChainScoreOutOfRange { index, score });
    }

    let product: f64 = scores.iter().map(|s| s / 100.0).product();
    let final_score = (product * 100.0).round();

    let warning = if scores.len() > MAX_CHAIN_STEPS {
        Some(ChainWarning::TooLong)
    } else if final_score < MIN_FIRM_SCORE {
        Some(ChainWarning::TooWeak)
    } else {
        None
    };

    Ok(ChainResult {
        final_score,
        steps: scores.len(),
        warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_step_is_identity() {
        for s in [0.0, 42.0, 60.0, 100.0] {
            assert_eq!(chain(&[s]).unwrap().final_score, s);
        }
    }

    #[test]
    fn test_three_weak_steps() {
        let result = chain(&[70.0, 70.0, 70.0]).unwrap();
        assert_eq!(result.final_score, 34.0);
        assert_eq!(result.warning, Some(ChainWarning::TooWeak));
    }

    #[test]
    fn test_four_steps_warn_about_length_only() {
        let result = chain(&[50.0, 50.0, 50.0, 50.0]).unwrap();
        assert_eq!(result.final_score, 6.0);
        assert_eq!(result.warning, Some(ChainWarning::TooLong));

        let strong = chain(&[100.0; 4]).unwrap();
        assert_eq!(strong.warning, Some(ChainWarning::TooLong));
    }

    #[test]
    fn test_firm_chain_has_no_warning() {
        let result = chain(&[95.0, 80.0]).unwrap();
        assert_eq!(result.final_score, 76.0);
        assert_eq!(result.warning, None);
    }

    #[test]
    fn test_rejects_out_of_range_steps() {
        assert_eq!(
            chain(&[80.0, 101.0]),
            Err(DomainError::ChainScoreOutOfRange { index: 1, score: 101.0 })
        );
        assert!(chain(&[-1.0]).is_err());
        assert!(chain(&[f64::INFINITY]).is_err());
    }
}
