//! Evidence verdicts and claim review

use crate::{GatekeeperConfig, GatekeeperError, TriggerDetector, TriggerMatch};
use gadfly_domain::{normalize_domain, DomainPolicy, EvidenceTier, FactDraft, FactStatus};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Verdict status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerdictStatus {
    /// Evidence is good enough for the domain
    Accepted,

    /// Evidence is refused; the claim should not be built upon
    Blocked,
}

/// Reasons for blocking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockReason {
    /// The domain requires stronger evidence
    BelowDomainMinimum {
        /// Domain that enforces the minimum
        domain: String,
        /// Weakest tier the domain accepts
        minimum: u8,
        /// Tier offered
        tier: u8,
    },

    /// The evidence score is under the configured floor
    BelowMinimumScore {
        /// Configured floor
        required: u8,
        /// Score of the tier offered
        actual: u8,
    },
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::BelowDomainMinimum {
                domain,
                minimum,
                tier,
            } => write!(
                f,
                "{} requires evidence of tier {} or stronger, got tier {}",
                domain, minimum, tier
            ),
            BlockReason::BelowMinimumScore { required, actual } => write!(
                f,
                "evidence score {} is below the required {}",
                actual, required
            ),
        }
    }
}

/// Result of judging one piece of evidence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvidenceVerdict {
    /// Tier that was judged
    pub tier: u8,

    /// Confidence score for the tier (0-100)
    pub score: u8,

    /// Accepted or blocked
    pub status: VerdictStatus,

    /// Why it was blocked, if it was
    pub reason: Option<BlockReason>,
}

impl EvidenceVerdict {
    /// Check if the evidence was accepted
    pub fn is_accepted(&self) -> bool {
        self.status == VerdictStatus::Accepted
    }
}

/// Full review of a claim: evidence verdict plus trigger scan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimReview {
    /// Claim text as reviewed
    pub claim: String,

    /// Normalized domain
    pub domain: String,

    /// Evidence verdict
    pub verdict: EvidenceVerdict,

    /// Trigger phrases found in the claim
    pub triggers: Vec<TriggerMatch>,

    /// Status the claim should be stored with
    pub fact_status: FactStatus,
}

impl ClaimReview {
    /// Draft for storing the reviewed claim, with the evidence score as confidence
    pub fn to_draft(&self) -> FactDraft {
        FactDraft::new(
            self.claim.clone(),
            self.domain.clone(),
            self.fact_status,
            f64::from(self.verdict.score),
        )
    }
}

/// The Gatekeeper judges evidence before a claim is stored
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    config: GatekeeperConfig,
    policy: Arc<DomainPolicy>,
    detector: TriggerDetector,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration and policy
    pub fn new(config: GatekeeperConfig, policy: Arc<DomainPolicy>) -> Result<Self, GatekeeperError> {
        config.validate()?;
        Ok(Self {
            config,
            policy,
            detector: TriggerDetector::new(),
        })
    }

    /// Create a Gatekeeper with default configuration and policy
    pub fn default_config() -> Self {
        Self {
            config: GatekeeperConfig::default(),
            policy: Arc::new(DomainPolicy::default()),
            detector: TriggerDetector::new(),
        }
    }

    /// Policy the gatekeeper reads
    pub fn policy(&self) -> &DomainPolicy {
        &self.policy
    }

    /// Judge evidence of `tier` offered in `domain`
    pub fn assess(&self, tier: EvidenceTier, domain: &str) -> EvidenceVerdict {
        let score = self.policy.evidence_score(tier);

        let mut reason = None;
        if self.config.enforce_strict_tiers && self.policy.is_blocked_in_domain(tier, domain) {
            reason = self
                .policy
                .strict_min_tier(domain)
                .map(|minimum| BlockReason::BelowDomainMinimum {
                    domain: normalize_domain(domain),
                    minimum,
                    tier: tier.value(),
                });
        }
        if reason.is_none() && score < self.config.min_score {
            reason = Some(BlockReason::BelowMinimumScore {
                required: self.config.min_score,
                actual: score,
            });
        }

        let status = match &reason {
            Some(reason) => {
                debug!(domain, tier = tier.value(), score, %reason, "Evidence blocked");
                VerdictStatus::Blocked
            }
            None => VerdictStatus::Accepted,
        };

        EvidenceVerdict {
            tier: tier.value(),
            score,
            status,
            reason,
        }
    }

    /// Judge a raw tier number, rejecting anything that is not an integer in 1..=5
    pub fn assess_raw(&self, tier: f64, domain: &str) -> Result<EvidenceVerdict, GatekeeperError> {
        let tier = EvidenceTier::try_from(tier)?;
        Ok(self.assess(tier, domain))
    }

    /// Review a claim: judge its evidence, scan its wording and pick a fact status
    ///
    /// Blocked evidence yields `BLOCKED`; accepted evidence at or above the
    /// verified tier yields `VERIFIED`; anything else stays a `CLAIM`.
    pub fn review(&self, claim: &str, tier: EvidenceTier, domain: &str) -> ClaimReview {
        let verdict = self.assess(tier, domain);
        let triggers = if self.config.scan_triggers {
            self.detector.scan(claim)
        } else {
            Vec::new()
        };

        let fact_status = if !verdict.is_accepted() {
            FactStatus::Blocked
        } else if tier.value() <= self.config.verified_max_tier {
            FactStatus::Verified
        } else {
            FactStatus::Claim
        };

        if !triggers.is_empty() {
            debug!(domain, triggers = triggers.len(), "Unverified wording in claim");
        }

        ClaimReview {
            claim: claim.trim().to_string(),
            domain: normalize_domain(domain),
            verdict,
            triggers,
            fact_status,
        }
    }
}
