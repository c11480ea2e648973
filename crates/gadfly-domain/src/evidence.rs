//! Evidence tiers - how strong the proof behind a claim is

use crate::error::DomainError;
use crate::policy::DomainPolicy;
use std::fmt;

/// Evidence tier from 1 (strongest) to 5 (weakest)
///
/// | Tier | Typical proof | Score |
/// |------|---------------|-------|
/// | 1 | Official documentation, specification, reproducible measurement | 95 |
/// | 2 | Peer-reviewed or vendor-published benchmark | 80 |
/// | 3 | Reputable secondary source | 65 |
/// | 4 | Personal experience, single anecdote | 50 |
/// | 5 | No source | 20 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EvidenceTier(u8);

impl EvidenceTier {
    /// Strongest tier
    pub const STRONGEST: EvidenceTier = EvidenceTier(1);

    /// Weakest tier
    pub const WEAKEST: EvidenceTier = EvidenceTier(5);

    /// Create a tier, rejecting anything outside 1..=5
    ///
    /// # Examples
    ///
    /// ```
    /// use gadfly_domain::EvidenceTier;
    ///
    /// assert!(EvidenceTier::new(1).is_ok());
    /// assert!(EvidenceTier::new(0).is_err());
    /// assert!(EvidenceTier::new(6).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidTier(value.to_string()))
        }
    }

    /// Get the raw tier number
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Confidence score under the default policy
    pub fn score(&self) -> u8 {
        score(*self)
    }
}

impl TryFrom<f64> for EvidenceTier {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract() != 0.0 || !(1.0..=5.0).contains(&value) {
            return Err(DomainError::InvalidTier(value.to_string()));
        }
        Self::new(value as u8)
    }
}

impl std::str::FromStr for EvidenceTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidTier(s.to_string()))?;
        Self::try_from(value)
    }
}

impl fmt::Display for EvidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {}", self.0)
    }
}

/// Fixed confidence score for a tier: {95, 80, 65, 50, 20}
pub fn score(tier: EvidenceTier) -> u8 {
    DEFAULT_SCORES[usize::from(tier.0 - 1)]
}

const DEFAULT_SCORES: [u8; 5] = [95, 80, 65, 50, 20];

/// Score a raw tier number, rejecting out-of-range and fractional input
pub fn score_raw(tier: f64) -> Result<u8, DomainError> {
    EvidenceTier::try_from(tier).map(score)
}

/// Check if a tier is refused outright in a domain under the default policy
pub fn is_blocked_in_domain(tier: EvidenceTier, domain: &str) -> bool {
    DomainPolicy::default().is_blocked_in_domain(tier, domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_scores() {
        let scores: Vec<u8> = (1..=5)
            .map(|t| EvidenceTier::new(t).unwrap().score())
            .collect();
        assert_eq!(scores, vec![95, 80, 65, 50, 20]);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(score_raw(0.0).is_err());
        assert!(score_raw(6.0).is_err());
        assert!(score_raw(-1.0).is_err());
    }

    #[test]
    fn test_rejects_non_integers() {
        assert!(score_raw(2.5).is_err());
        assert!(score_raw(f64::NAN).is_err());
        assert!("1.5".parse::<EvidenceTier>().is_err());
        assert_eq!("3".parse::<EvidenceTier>().unwrap().value(), 3);
    }

    #[test]
    fn test_strict_domains() {
        let tier = |t| EvidenceTier::new(t).unwrap();
        assert!(is_blocked_in_domain(tier(3), "security"));
        assert!(!is_blocked_in_domain(tier(2), "security"));
        assert!(is_blocked_in_domain(tier(2), "compliance"));
        assert!(!is_blocked_in_domain(tier(1), "compliance"));
        assert!(!is_blocked_in_domain(tier(5), "cooking"));
    }

    #[test]
    fn test_tier_ordering() {
        assert!(EvidenceTier::STRONGEST < EvidenceTier::WEAKEST);
    }
}
