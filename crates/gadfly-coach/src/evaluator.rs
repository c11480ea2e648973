//! Challenge evaluation - how hard to push back, given a profile

use crate::pedagogy::{self, ProfileSnapshot};
use gadfly_domain::policy::RATING_MIDPOINT;
use gadfly_domain::{ChallengeStyle, DomainPolicy, DomainProfile, ScaffoldLevel};
use serde::Serialize;
use std::sync::Arc;

/// Consecutive blocked outcomes that count as a losing streak
pub const TILT_THRESHOLD: u32 = 3;

/// Everything the assistant needs to challenge a claim in one domain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChallengeContext {
    /// Domain name
    pub domain: String,
    /// Current rating
    pub rating: f64,
    /// Current deviation
    pub rd: f64,
    /// Scaffolding for the rating
    pub scaffold_level: ScaffoldLevel,
    /// Prompts that go with the scaffolding
    pub scaffold_prompts: Vec<String>,
    /// Challenge posture
    pub challenge_style: ChallengeStyle,
    /// Label a blocked claim would carry
    pub blocked_label: String,
    /// No claim judged yet; always challenge
    pub first_blood: bool,
    /// Rating sits in the overconfidence band
    pub in_dead_zone: bool,
    /// Losing streak detected
    pub tilt_detected: bool,
    /// Ask rather than correct
    pub should_soft_challenge: bool,
    /// Instruction bundle for the assistant
    pub instructions: String,
}

/// Derives challenge posture from a profile
#[derive(Debug, Clone)]
pub struct ChallengeEvaluator {
    policy: Arc<DomainPolicy>,
    tilt_threshold: u32,
}

impl ChallengeEvaluator {
    /// Create an evaluator reading thresholds from `policy`
    pub fn new(policy: Arc<DomainPolicy>) -> Self {
        Self {
            policy,
            tilt_threshold: TILT_THRESHOLD,
        }
    }

    /// Evaluator with the default policy
    pub fn default_policy() -> Self {
        Self::new(Arc::new(DomainPolicy::default()))
    }

    /// Change how many blocked outcomes in a row count as tilt
    pub fn with_tilt_threshold(mut self, threshold: u32) -> Self {
        self.tilt_threshold = threshold;
        self
    }

    /// Streak length that counts as tilt
    pub fn tilt_threshold(&self) -> u32 {
        self.tilt_threshold
    }

    /// Snapshot of a profile for the pedagogy layer
    pub fn snapshot<'a>(&self, domain: &'a str, profile: &DomainProfile) -> ProfileSnapshot<'a> {
        let in_dead_zone = self.policy.in_dead_zone(profile.rating);
        ProfileSnapshot {
            domain,
            rating: profile.rating,
            rd: profile.rd,
            scaffold_level: self.policy.scaffold_level(profile.rating),
            challenge_style: self.policy.challenge_style(profile.rating),
            first_blood: !profile.first_claim_made,
            in_dead_zone,
            tilt_detected: profile.is_tilted(self.tilt_threshold),
            should_soft_challenge: profile.rating < RATING_MIDPOINT || in_dead_zone,
        }
    }

    /// Evaluate how to challenge the next claim in `domain`
    ///
    /// # Examples
    ///
    /// ```
    /// use gadfly_coach::ChallengeEvaluator;
    /// use gadfly_domain::{DomainProfile, ScaffoldLevel};
    ///
    /// let context = ChallengeEvaluator::default_policy()
    ///     .evaluate("security", &DomainProfile::default());
    /// assert!(context.first_blood);
    /// assert!(context.should_soft_challenge);
    /// assert_eq!(context.scaffold_level, ScaffoldLevel::Full);
    /// ```
    pub fn evaluate(&self, domain: &str, profile: &DomainProfile) -> ChallengeContext {
        let snapshot = self.snapshot(domain, profile);

        ChallengeContext {
            domain: domain.to_string(),
            rating: profile.rating,
            rd: profile.rd,
            scaffold_level: snapshot.scaffold_level,
            scaffold_prompts: snapshot
                .scaffold_level
                .prompts()
                .iter()
                .map(|p| p.to_string())
                .collect(),
            challenge_style: snapshot.challenge_style,
            blocked_label: self.policy.blocked_label(profile.rating).to_string(),
            first_blood: snapshot.first_blood,
            in_dead_zone: snapshot.in_dead_zone,
            tilt_detected: snapshot.tilt_detected,
            should_soft_challenge: snapshot.should_soft_challenge,
            instructions: pedagogy::instructions(&snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gadfly_domain::policy::RatingBand;
    use gadfly_domain::{Outcome, ResultRecord};

    fn profile(rating: f64) -> DomainProfile {
        DomainProfile {
            rating,
            first_claim_made: true,
            ..DomainProfile::default()
        }
    }

    #[test]
    fn test_expert_gets_adversarial_peer_review() {
        let context = ChallengeEvaluator::default_policy().evaluate("algorithms", &profile(800.0));
        assert_eq!(context.scaffold_level, ScaffoldLevel::Adversarial);
        assert_eq!(context.challenge_style, ChallengeStyle::Learner);
        assert!(!context.first_blood);
        assert!(!context.should_soft_challenge);
        assert!(context.blocked_label.starts_with("Peer check"));
    }

    #[test]
    fn test_dead_zone_softens_challenge() {
        let context = ChallengeEvaluator::default_policy().evaluate("security", &profile(520.0));
        assert!(context.in_dead_zone);
        assert!(context.should_soft_challenge);
        assert_eq!(context.challenge_style, ChallengeStyle::Peer);
    }

    #[test]
    fn test_instructions_agree_with_soft_flag() {
        let policy = DomainPolicy {
            dead_zone: RatingBand { low: 700.0, high: 800.0 },
            ..DomainPolicy::default()
        };
        let evaluator = ChallengeEvaluator::new(Arc::new(policy));

        let shifted = evaluator.evaluate("security", &profile(750.0));
        assert!(shifted.should_soft_challenge);
        assert!(shifted.instructions.contains("Challenge softly"));

        let firm = evaluator.evaluate("security", &profile(520.0));
        assert!(!firm.should_soft_challenge);
        assert!(!firm.instructions.contains("Challenge softly"));
    }

    #[test]
    fn test_tilt_detection_and_reset() {
        let evaluator = ChallengeEvaluator::default_policy();
        let mut p = profile(300.0);
        let blocked = ResultRecord {
            new_rating: 300.0,
            new_rd: 150.0,
            ..ResultRecord::default()
        };

        for _ in 0..3 {
            p.apply_result(Outcome::Blocked, blocked.clone(), Utc::now());
        }
        assert!(evaluator.evaluate("security", &p).tilt_detected);

        p.apply_result(Outcome::Partial, blocked, Utc::now());
        assert!(!evaluator.evaluate("security", &p).tilt_detected);
    }

    #[test]
    fn test_custom_tilt_threshold() {
        let evaluator = ChallengeEvaluator::default_policy().with_tilt_threshold(1);
        let mut p = profile(300.0);
        p.blocked_streak = 1;
        assert!(evaluator.evaluate("security", &p).tilt_detected);
    }

    #[test]
    fn test_instructions_follow_prompts() {
        let context = ChallengeEvaluator::default_policy().evaluate("performance", &profile(250.0));
        assert_eq!(context.scaffold_level, ScaffoldLevel::Guided);
        for prompt in &context.scaffold_prompts {
            assert!(context.instructions.contains(prompt.as_str()));
        }
    }
}
