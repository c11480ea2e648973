//! Rating update - a simplified Glicko-style step against a fixed baseline
//!
//! Every claim is scored against a virtual opponent sitting at the middle of the
//! scale (rating 500, RD 100). Unlike textbook Glicko-2 the mean update is scaled
//! by `K / 32`, so a domain's K-factor tunes how far one outcome moves the rating
//! while the deviation update stays unscaled.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Glicko-2 scale constant between the public and internal scales
pub const SCALE: f64 = 173.7178;

/// Volatility constant
pub const TAU: f64 = 0.5;

/// Rating of the baseline opponent
pub const BASELINE_RATING: f64 = 500.0;

/// Deviation of the baseline opponent
pub const BASELINE_RD: f64 = 100.0;

/// Lowest rating
pub const MIN_RATING: f64 = 0.0;

/// Highest rating
pub const MAX_RATING: f64 = 1000.0;

/// Lowest deviation (most certain)
pub const MIN_RD: f64 = 10.0;

/// Highest deviation; also the initial uncertainty of a new profile
pub const MAX_RD: f64 = 200.0;

/// Outcome of a challenged claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    /// Claim did not hold up (score 0)
    Blocked,
    /// Claim partly held up (score 0.5)
    Partial,
    /// Claim was backed by evidence (score 1)
    Validated,
}

impl Outcome {
    /// Score fed to the update
    pub fn score(&self) -> f64 {
        match self {
            Outcome::Blocked => 0.0,
            Outcome::Partial => 0.5,
            Outcome::Validated => 1.0,
        }
    }

    /// Map a raw score back to an outcome, rejecting anything but 0, 0.5 and 1
    ///
    /// # Examples
    ///
    /// ```
    /// use gadfly_domain::Outcome;
    ///
    /// assert_eq!(Outcome::from_score(0.5).unwrap(), Outcome::Partial);
    /// assert!(Outcome::from_score(0.7).is_err());
    /// ```
    pub fn from_score(score: f64) -> Result<Self, DomainError> {
        if score == 0.0 {
            Ok(Outcome::Blocked)
        } else if score == 0.5 {
            Ok(Outcome::Partial)
        } else if score == 1.0 {
            Ok(Outcome::Validated)
        } else {
            Err(DomainError::InvalidOutcome(score))
        }
    }

    /// Get the outcome label
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Blocked => "BLOCKED",
            Outcome::Partial => "PARTIAL",
            Outcome::Validated => "VALIDATED",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Outcome {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BLOCKED" => Ok(Outcome::Blocked),
            "PARTIAL" => Ok(Outcome::Partial),
            "VALIDATED" => Ok(Outcome::Validated),
            _ => Err(DomainError::UnknownLabel(s.to_string())),
        }
    }
}

/// Result of one rating update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdate {
    /// Rating after the update, clamped to [0, 1000]
    pub new_rating: f64,
    /// Deviation after the update, clamped to [10, 200]
    pub new_rd: f64,
    /// `new_rating - rating`
    pub delta: f64,
    /// Expected score against the baseline, as a rounded percentage
    pub probability: u8,
}

/// Clamp a rating to its bounds
pub fn clamp_rating(rating: f64) -> f64 {
    rating.clamp(MIN_RATING, MAX_RATING)
}

/// Clamp a deviation to its bounds
pub fn clamp_rd(rd: f64) -> f64 {
    rd.clamp(MIN_RD, MAX_RD)
}

fn g(phi: f64) -> f64 {
    1.0 / (1.0 + 3.0 * phi * phi / (PI * PI)).sqrt()
}

/// Apply one outcome to `(rating, rd)` with K-factor `k`
///
/// # Examples
///
/// ```
/// use gadfly_domain::rating::{update, Outcome};
///
/// let up = update(500.0, 100.0, Outcome::Validated, 32.0);
/// assert!(up.delta > 0.0);
/// assert_eq!(up.probability, 50);
/// ```
pub fn update(rating: f64, rd: f64, outcome: Outcome, k: f64) -> RatingUpdate {
    let mu = (rating - BASELINE_RATING) / SCALE;
    let phi = rd / SCALE;
    let opponent_mu = 0.0;
    let opponent_phi = BASELINE_RD / SCALE;

    let g = g(opponent_phi);
    let expected = 1.0 / (1.0 + (-g * (mu - opponent_mu)).exp());
    let variance = 1.0 / (g * g * expected * (1.0 - expected));

    let pre_period = (phi * phi + TAU * TAU).sqrt();
    let new_phi = 1.0 / (1.0 / (pre_period * pre_period) + 1.0 / variance).sqrt();
    let new_mu = mu + new_phi * new_phi * g * (outcome.score() - expected) * (k / 32.0);

    let new_rating = clamp_rating(new_mu * SCALE + BASELINE_RATING);
    let new_rd = clamp_rd(new_phi * SCALE);

    RatingUpdate {
        new_rating,
        new_rd,
        delta: new_rating - rating,
        probability: (expected * 100.0).round() as u8,
    }
}

/// Apply a raw score, rejecting anything outside {0, 0.5, 1}
pub fn update_with_score(
    rating: f64,
    rd: f64,
    score: f64,
    k: f64,
) -> Result<RatingUpdate, DomainError> {
    Outcome::from_score(score).map(|outcome| update(rating, rd, outcome, k))
}

/// Grow the deviation after `days` of inactivity, capped at the initial 200
///
/// # Examples
///
/// ```
/// use gadfly_domain::rating::decay_rd;
///
/// assert_eq!(decay_rd(50.0, 0.0), 50.0);
/// assert!(decay_rd(50.0, 30.0) > 50.0);
/// assert_eq!(decay_rd(50.0, 1.0e9), 200.0);
/// ```
pub fn decay_rd(rd: f64, days: f64) -> f64 {
    if days <= 0.0 {
        return rd;
    }
    let phi = rd / SCALE;
    let decayed = (phi * phi + TAU * TAU * days / 365.0).sqrt();
    (decayed * SCALE).min(MAX_RD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_score_rejects_other_values() {
        assert!(Outcome::from_score(0.25).is_err());
        assert!(Outcome::from_score(2.0).is_err());
        assert!(Outcome::from_score(f64::NAN).is_err());
        assert!(update_with_score(500.0, 100.0, 0.3, 32.0).is_err());
    }

    #[test]
    fn test_validated_raises_blocked_lowers() {
        let up = update(300.0, 150.0, Outcome::Validated, 32.0);
        let down = update(300.0, 150.0, Outcome::Blocked, 32.0);
        assert!(up.delta > 0.0);
        assert!(down.delta < 0.0);
    }

    #[test]
    fn test_partial_at_baseline_is_neutral() {
        let result = update(500.0, 100.0, Outcome::Partial, 32.0);
        assert_eq!(result.delta, 0.0);
        assert_eq!(result.probability, 50);
    }

    #[test]
    fn test_fresh_profile_floor() {
        let result = update(0.0, 200.0, Outcome::Blocked, 32.0);
        assert_eq!(result.new_rating, 0.0);
        assert_eq!(result.delta, 0.0);
        assert!(result.probability < 10);
    }

    #[test]
    fn test_higher_k_moves_further() {
        let low = update(400.0, 120.0, Outcome::Validated, 26.0);
        let high = update(400.0, 120.0, Outcome::Validated, 48.0);
        assert!(high.delta > low.delta);
    }

    #[test]
    fn test_rd_shrinks_with_evidence() {
        let result = update(500.0, 200.0, Outcome::Validated, 32.0);
        assert!(result.new_rd < 200.0);
    }

    #[test]
    fn test_decay_monotone_and_capped() {
        let mut previous = 40.0;
        for days in [1.0, 7.0, 30.0, 365.0, 5000.0] {
            let decayed = decay_rd(40.0, days);
            assert!(decayed >= previous);
            assert!(decayed <= MAX_RD);
            previous = decayed;
        }
        assert_eq!(decay_rd(40.0, -3.0), 40.0);
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!("validated".parse::<Outcome>().unwrap(), Outcome::Validated);
        assert_eq!(Outcome::Blocked.to_string(), "BLOCKED");
        assert!("maybe".parse::<Outcome>().is_err());
    }
}
