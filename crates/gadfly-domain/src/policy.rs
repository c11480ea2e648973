//! Domain policy table - the static thresholds every other layer reads
//!
//! The policy is a plain value. Callers build one (usually `DomainPolicy::default()`
//! or a TOML-loaded override) and hand it to whatever needs it, so tests can swap
//! thresholds without touching shared state.

use crate::evidence::EvidenceTier;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Base K-factor before the per-domain multiplier is applied
pub const BASE_K_FACTOR: f64 = 32.0;

/// Midpoint of the rating scale; challenge style is computed from the gap to it
pub const RATING_MIDPOINT: f64 = 500.0;

/// How much scaffolding the assistant offers alongside a challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaffoldLevel {
    /// Beginner: every step is walked through
    Full,
    /// Hints and worked examples on request
    Guided,
    /// Normal back-and-forth
    Standard,
    /// Expert: arguments are stress-tested
    Adversarial,
}

impl ScaffoldLevel {
    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ScaffoldLevel::Full => "full",
            ScaffoldLevel::Guided => "guided",
            ScaffoldLevel::Standard => "standard",
            ScaffoldLevel::Adversarial => "adversarial",
        }
    }

    /// Scaffold prompts attached to this level
    pub fn prompts(&self) -> &'static [&'static str] {
        match self {
            ScaffoldLevel::Full => &[
                "Break the claim into the smallest steps you can state",
                "Name one place you could check each step",
                "Offer a worked example before asking for a source",
            ],
            ScaffoldLevel::Guided => &[
                "Ask which part of the claim they are least sure about",
                "Suggest the kind of source that would settle it",
            ],
            ScaffoldLevel::Standard => &["Ask for the source or the measurement behind the claim"],
            ScaffoldLevel::Adversarial => &[
                "Probe the edge cases the claim glosses over",
                "Ask what result would change their mind",
            ],
        }
    }
}

/// Posture of the challenge relative to the user's measured competence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStyle {
    /// User is far below the midpoint: teach first
    Guide,
    /// Regular challenge
    Standard,
    /// User is near the midpoint: discuss as equals
    Peer,
    /// User is ahead: the assistant asks to learn
    Learner,
}

impl ChallengeStyle {
    /// Get the style name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeStyle::Guide => "guide",
            ChallengeStyle::Standard => "standard",
            ChallengeStyle::Peer => "peer",
            ChallengeStyle::Learner => "learner",
        }
    }
}

/// Model tier recommended for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    /// Highest-capability tier
    Frontier,
    /// Balanced cost/capability tier
    Balanced,
    /// Most efficient tier
    Efficient,
}

impl ModelTier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTier::Frontier => "frontier",
            ModelTier::Balanced => "balanced",
            ModelTier::Efficient => "efficient",
        }
    }
}

/// Inclusive rating band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingBand {
    /// Lower bound (inclusive)
    pub low: f64,
    /// Upper bound (inclusive)
    pub high: f64,
}

impl RatingBand {
    /// Check if a rating falls inside the band
    pub fn contains(&self, rating: f64) -> bool {
        rating >= self.low && rating <= self.high
    }
}

/// The policy table
///
/// Every field has a default; a partial TOML table only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainPolicy {
    /// K-factor multipliers per domain (unlisted domains use 1.0)
    pub k_multipliers: BTreeMap<String, f64>,

    /// Rating breakpoints between full/guided, guided/standard, standard/adversarial
    pub scaffold_breakpoints: [f64; 3],

    /// Gap (rating - 500) breakpoints between guide/standard, standard/peer, peer/learner
    pub style_gap_breakpoints: [f64; 3],

    /// Band where overconfidence is likeliest
    pub dead_zone: RatingBand,

    /// Rating breakpoints for the blocked labels
    pub blocked_label_breakpoints: [f64; 2],

    /// Label text for a blocked claim, lowest band first
    pub blocked_labels: [String; 3],

    /// Fact half-life in days for listed domains
    pub half_life_days: BTreeMap<String, u32>,

    /// Domains whose facts never expire
    pub never_expires: BTreeSet<String>,

    /// Half-life for domains that are not listed anywhere
    pub default_half_life_days: u32,

    /// Confidence score for evidence tiers 1 through 5
    pub evidence_scores: [u8; 5],

    /// Domains that refuse evidence weaker than the given tier
    pub strict_min_tier: BTreeMap<String, u8>,

    /// Highest rating still routed to the frontier tier
    pub frontier_max_rating: f64,

    /// Highest rating still routed to the balanced tier
    pub balanced_max_rating: f64,
}

impl Default for DomainPolicy {
    fn default() -> Self {
        let k_multipliers = [
            ("security", 1.5),
            ("compliance", 1.5),
            ("performance", 1.2),
            ("algorithms", 0.8),
        ];
        let half_life_days = [
            ("security", 180),
            ("compliance", 365),
            ("performance", 90),
            ("frameworks", 120),
            ("infrastructure", 180),
        ];
        let strict_min_tier = [("security", 2), ("performance", 2), ("compliance", 1)];

        Self {
            k_multipliers: k_multipliers
                .into_iter()
                .map(|(d, m)| (d.to_string(), m))
                .collect(),
            scaffold_breakpoints: [200.0, 500.0, 700.0],
            style_gap_breakpoints: [-400.0, -100.0, 100.0],
            dead_zone: RatingBand { low: 450.0, high: 550.0 },
            blocked_label_breakpoints: [300.0, 600.0],
            blocked_labels: [
                "Needs evidence: let's find a source together before building on this".to_string(),
                "Needs a source: which reference backs this up?".to_string(),
                "Peer check: walk me through the proof".to_string(),
            ],
            half_life_days: half_life_days
                .into_iter()
                .map(|(d, days)| (d.to_string(), days))
                .collect(),
            never_expires: ["algorithms", "mathematics"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_half_life_days: 365,
            evidence_scores: [95, 80, 65, 50, 20],
            strict_min_tier: strict_min_tier
                .into_iter()
                .map(|(d, t)| (d.to_string(), t))
                .collect(),
            frontier_max_rating: 200.0,
            balanced_max_rating: 600.0,
        }
    }
}

/// Canonical form of a domain name: trimmed and lowercased
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().to_lowercase()
}

impl DomainPolicy {
    /// K-factor for a domain: `round(32 × multiplier)`
    ///
    /// # Examples
    ///
    /// ```
    /// use gadfly_domain::DomainPolicy;
    ///
    /// let policy = DomainPolicy::default();
    /// assert_eq!(policy.k_factor("security"), 48.0);
    /// assert_eq!(policy.k_factor("algorithms"), 26.0);
    /// assert_eq!(policy.k_factor("cooking"), 32.0);
    /// ```
    pub fn k_factor(&self, domain: &str) -> f64 {
        let multiplier = self
            .k_multipliers
            .get(&normalize_domain(domain))
            .copied()
            .unwrap_or(1.0);
        (BASE_K_FACTOR * multiplier).round()
    }

    /// Scaffold level for a rating
    pub fn scaffold_level(&self, rating: f64) -> ScaffoldLevel {
        let [full, guided, standard] = self.scaffold_breakpoints;
        if rating < full {
            ScaffoldLevel::Full
        } else if rating < guided {
            ScaffoldLevel::Guided
        } else if rating < standard {
            ScaffoldLevel::Standard
        } else {
            ScaffoldLevel::Adversarial
        }
    }

    /// Challenge style for a rating, from its gap to the midpoint
    pub fn challenge_style(&self, rating: f64) -> ChallengeStyle {
        let gap = rating - RATING_MIDPOINT;
        let [guide, standard, peer] = self.style_gap_breakpoints;
        if gap < guide {
            ChallengeStyle::Guide
        } else if gap < standard {
            ChallengeStyle::Standard
        } else if gap < peer {
            ChallengeStyle::Peer
        } else {
            ChallengeStyle::Learner
        }
    }

    /// Check if a rating sits in the dead zone
    pub fn in_dead_zone(&self, rating: f64) -> bool {
        self.dead_zone.contains(rating)
    }

    /// Label shown when a claim is blocked at this rating
    pub fn blocked_label(&self, rating: f64) -> &str {
        let [low, mid] = self.blocked_label_breakpoints;
        let index = if rating < low {
            0
        } else if rating < mid {
            1
        } else {
            2
        };
        &self.blocked_labels[index]
    }

    /// Fact half-life in days, `None` when the domain never expires
    pub fn half_life_days(&self, domain: &str) -> Option<u32> {
        let domain = normalize_domain(domain);
        if self.never_expires.contains(&domain) {
            return None;
        }
        Some(
            self.half_life_days
                .get(&domain)
                .copied()
                .unwrap_or(self.default_half_life_days),
        )
    }

    /// Confidence score for an evidence tier
    pub fn evidence_score(&self, tier: EvidenceTier) -> u8 {
        self.evidence_scores[usize::from(tier.value() - 1)]
    }

    /// Strictest tier a domain accepts, if it enforces one
    pub fn strict_min_tier(&self, domain: &str) -> Option<u8> {
        self.strict_min_tier.get(&normalize_domain(domain)).copied()
    }

    /// Check if evidence of this tier is refused outright in the domain
    ///
    /// # Examples
    ///
    /// ```
    /// use gadfly_domain::{DomainPolicy, EvidenceTier};
    ///
    /// let policy = DomainPolicy::default();
    /// let tier = |t| EvidenceTier::new(t).unwrap();
    /// assert!(policy.is_blocked_in_domain(tier(3), "security"));
    /// assert!(!policy.is_blocked_in_domain(tier(2), "security"));
    /// assert!(!policy.is_blocked_in_domain(tier(5), "frameworks"));
    /// ```
    pub fn is_blocked_in_domain(&self, tier: EvidenceTier, domain: &str) -> bool {
        self.strict_min_tier(domain)
            .is_some_and(|minimum| tier.value() > minimum)
    }

    /// Model tier for the strongest active rating of a session
    pub fn model_tier(&self, rating: f64) -> ModelTier {
        if rating <= self.frontier_max_rating {
            ModelTier::Frontier
        } else if rating <= self.balanced_max_rating {
            ModelTier::Balanced
        } else {
            ModelTier::Efficient
        }
    }
}
