//! Fact module - a claim together with the confidence we hold in it

use crate::error::DomainError;
use crate::policy::normalize_domain;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a fact, derived from its content
///
/// The id is the first 16 hex characters of BLAKE3 over the claim text and the
/// domain, so asserting the same claim in the same domain always lands on the
/// same record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactId(String);

impl FactId {
    /// Derive the id for a (claim, domain) pair
    ///
    /// # Examples
    ///
    /// ```
    /// use gadfly_domain::FactId;
    ///
    /// let a = FactId::from_content("Argon2 beats bcrypt", "security");
    /// let b = FactId::from_content("Argon2 beats bcrypt", "security");
    /// assert_eq!(a, b);
    /// assert_eq!(a.as_str().len(), 16);
    /// assert_ne!(a, FactId::from_content("Argon2 beats bcrypt", "performance"));
    /// ```
    pub fn from_content(claim: &str, domain: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(claim.as_bytes());
        hasher.update(&[0]);
        hasher.update(domain.as_bytes());
        let hex = hasher.finalize().to_hex();
        Self(hex.as_str()[..16].to_string())
    }

    /// Get the id as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Epistemic status of a fact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FactStatus {
    /// Asserted, not yet checked
    Claim,
    /// Backed by strong evidence
    Verified,
    /// Stated as a preference or judgement
    Opinion,
    /// Proposed for testing
    Hypothesis,
    /// Refused for insufficient evidence
    Blocked,
    /// Contradicted by other evidence
    Disputed,
}

impl FactStatus {
    /// All statuses in declaration order
    pub const ALL: [FactStatus; 6] = [
        FactStatus::Claim,
        FactStatus::Verified,
        FactStatus::Opinion,
        FactStatus::Hypothesis,
        FactStatus::Blocked,
        FactStatus::Disputed,
    ];

    /// Get the status label
    pub fn as_str(&self) -> &'static str {
        match self {
            FactStatus::Claim => "CLAIM",
            FactStatus::Verified => "VERIFIED",
            FactStatus::Opinion => "OPINION",
            FactStatus::Hypothesis => "HYPOTHESIS",
            FactStatus::Blocked => "BLOCKED",
            FactStatus::Disputed => "DISPUTED",
        }
    }
}

impl fmt::Display for FactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FactStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == upper)
            .ok_or_else(|| DomainError::UnknownLabel(s.to_string()))
    }
}

/// A stored fact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    /// Content-derived identifier
    pub id: FactId,

    /// Claim text
    pub claim: String,

    /// Topic domain
    pub domain: String,

    /// Epistemic status
    pub status: FactStatus,

    /// Confidence in [0, 100]
    pub confidence: f64,

    /// Where the claim came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Evidence offered for it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<String>,

    /// Session that produced it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// First time the fact was stored
    pub created_at: DateTime<Utc>,

    /// Last time it was re-asserted
    pub updated_at: DateTime<Utc>,

    /// When it should be re-verified (`None` = never)
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Input for adding a fact
#[derive(Debug, Clone, PartialEq)]
pub struct FactDraft {
    /// Claim text
    pub claim: String,
    /// Topic domain
    pub domain: String,
    /// Epistemic status
    pub status: FactStatus,
    /// Confidence in [0, 100]
    pub confidence: f64,
    /// Source reference
    pub source: Option<String>,
    /// Proof reference
    pub proof: Option<String>,
    /// Producing session
    pub session_id: Option<String>,
    /// Creation time; defaults to now when stored
    pub created_at: Option<DateTime<Utc>>,
}

impl FactDraft {
    /// Create a draft with no optional references
    pub fn new(
        claim: impl Into<String>,
        domain: impl Into<String>,
        status: FactStatus,
        confidence: f64,
    ) -> Self {
        Self {
            claim: claim.into(),
            domain: domain.into(),
            status,
            confidence,
            source: None,
            proof: None,
            session_id: None,
            created_at: None,
        }
    }

    /// Attach a source reference
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach a proof reference
    pub fn with_proof(mut self, proof: impl Into<String>) -> Self {
        self.proof = Some(proof.into());
        self
    }

    /// Attach the producing session
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Backdate the fact
    pub fn backdated(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Id the draft will be stored under
    ///
    /// The claim is trimmed and the domain normalized first, so drafts that
    /// differ only in surrounding whitespace or case share an id.
    pub fn id(&self) -> FactId {
        FactId::from_content(self.claim.trim(), &normalize_domain(&self.domain))
    }

    /// Check the draft before it touches any store
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.claim.trim().is_empty() {
            return Err(DomainError::InvalidFact {
                field: "claim",
                reason: "must not be empty".to_string(),
            });
        }
        if self.domain.trim().is_empty() {
            return Err(DomainError::InvalidFact {
                field: "domain",
                reason: "must not be empty".to_string(),
            });
        }
        if !self.confidence.is_finite() || !(0.0..=100.0).contains(&self.confidence) {
            return Err(DomainError::InvalidFact {
                field: "confidence",
                reason: format!("{} is outside [0, 100]", self.confidence),
            });
        }
        Ok(())
    }
}

/// Filter for listing facts
#[derive(Debug, Clone, Default)]
pub struct FactQuery {
    /// Only facts in this domain
    pub domain: Option<String>,
    /// Only facts with this status
    pub status: Option<FactStatus>,
    /// Only facts from this session
    pub session_id: Option<String>,
    /// Only facts whose expiry has passed
    pub expired_only: bool,
}

impl FactQuery {
    /// Check if a fact passes the filter at time `now`
    pub fn matches(&self, fact: &Fact, now: DateTime<Utc>) -> bool {
        if self.domain.as_deref().is_some_and(|d| d != fact.domain) {
            return false;
        }
        if self.status.is_some_and(|s| s != fact.status) {
            return false;
        }
        if self
            .session_id
            .as_deref()
            .is_some_and(|s| Some(s) != fact.session_id.as_deref())
        {
            return false;
        }
        if self.expired_only && !fact.expires_at.is_some_and(|e| e <= now) {
            return false;
        }
        true
    }
}
