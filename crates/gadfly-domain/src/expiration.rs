//! Expiration model - how long a fact stays trustworthy in its domain
//!
//! Each domain has a half-life in days (see [`DomainPolicy::half_life_days`]).
//! A fact created at `t` should be re-verified at `t + half_life`; domains such as
//! algorithms never expire.

use crate::fact::Fact;
use crate::policy::DomainPolicy;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Days before expiry at which a fact starts warning
pub const EXPIRING_SOON_DAYS: i64 = 30;

/// Where a fact stands relative to its expiry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpirationStatus {
    /// Expiry has passed
    pub expired: bool,
    /// Expiry is close but has not passed
    pub expiring_soon: bool,
    /// Resolved expiry, `None` for facts that never expire
    pub expires_at: Option<DateTime<Utc>>,
    /// Whole days left, rounded up; zero or negative once expired
    pub days_remaining: Option<i64>,
    /// Human-readable warning
    pub warning: Option<String>,
}

impl ExpirationStatus {
    fn evergreen() -> Self {
        Self {
            expired: false,
            expiring_soon: false,
            expires_at: None,
            days_remaining: None,
            warning: None,
        }
    }
}

/// Anything that can judge a fact's expiry
///
/// The knowledge graph audit takes a checker rather than a concrete model so
/// callers can plug in their own clock or thresholds.
pub trait ExpirationChecker {
    /// Classify one fact
    fn check(&self, fact: &Fact) -> ExpirationStatus;
}

/// Policy-backed expiration model
#[derive(Debug, Clone)]
pub struct ExpirationModel {
    policy: Arc<DomainPolicy>,
    soon_days: i64,
    reference_time: Option<DateTime<Utc>>,
}

impl ExpirationModel {
    /// Create a model reading half-lives from `policy`, checking against the wall clock
    pub fn new(policy: Arc<DomainPolicy>) -> Self {
        Self {
            policy,
            soon_days: EXPIRING_SOON_DAYS,
            reference_time: None,
        }
    }

    /// Model with the default policy
    pub fn default_policy() -> Self {
        Self::new(Arc::new(DomainPolicy::default()))
    }

    /// Check against a fixed time instead of the wall clock
    pub fn at(mut self, reference_time: DateTime<Utc>) -> Self {
        self.reference_time = Some(reference_time);
        self
    }

    /// Change the expiring-soon window
    pub fn with_soon_days(mut self, days: i64) -> Self {
        self.soon_days = days;
        self
    }

    /// Time the model checks against
    pub fn now(&self) -> DateTime<Utc> {
        self.reference_time.unwrap_or_else(Utc::now)
    }

    /// Expiry for a fact created at `created_at`, or `None` if the domain never expires
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use gadfly_domain::ExpirationModel;
    ///
    /// let model = ExpirationModel::default_policy();
    /// let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    ///
    /// let expiry = model.expires_at("security", created).unwrap();
    /// assert_eq!(expiry.date_naive().to_string(), "2026-06-30");
    /// assert_eq!(model.expires_at("algorithms", created), None);
    /// ```
    pub fn expires_at(&self, domain: &str, created_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.policy
            .half_life_days(domain)
            .map(|days| created_at + Duration::days(i64::from(days)))
    }

    /// Classify a fact against the model's reference time
    pub fn check_expiration(&self, fact: &Fact) -> ExpirationStatus {
        let Some(expires_at) = fact
            .expires_at
            .or_else(|| self.expires_at(&fact.domain, fact.created_at))
        else {
            return ExpirationStatus::evergreen();
        };

        let seconds_left = (expires_at - self.now()).num_seconds();
        let days_remaining = (seconds_left as f64 / 86_400.0).ceil() as i64;

        let (expired, expiring_soon, warning) = if days_remaining <= 0 {
            (
                true,
                false,
                Some(format!(
                    "Expired {} day(s) ago in {}; re-verify before relying on it",
                    -days_remaining, fact.domain
                )),
            )
        } else if days_remaining <= self.soon_days {
            (
                false,
                true,
                Some(format!(
                    "Expires in {} day(s); schedule a re-check",
                    days_remaining
                )),
            )
        } else {
            (false, false, None)
        };

        ExpirationStatus {
            expired,
            expiring_soon,
            expires_at: Some(expires_at),
            days_remaining: Some(days_remaining),
            warning,
        }
    }
}

impl ExpirationChecker for ExpirationModel {
    fn check(&self, fact: &Fact) -> ExpirationStatus {
        self.check_expiration(fact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fact::{FactId, FactStatus};
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn fact(domain: &str, created_at: DateTime<Utc>) -> Fact {
        Fact {
            id: FactId::from_content("TLS 1.3 removes RSA key exchange", domain),
            claim: "TLS 1.3 removes RSA key exchange".to_string(),
            domain: domain.to_string(),
            status: FactStatus::Verified,
            confidence: 95.0,
            source: None,
            proof: None,
            session_id: None,
            created_at,
            updated_at: created_at,
            expires_at: None,
        }
    }

    #[test]
    fn test_security_half_life() {
        let model = ExpirationModel::default_policy();
        assert_eq!(
            model.expires_at("security", day(2026, 1, 1)),
            Some(day(2026, 6, 30))
        );
    }

    #[test]
    fn test_never_expiring_domain() {
        let model = ExpirationModel::default_policy().at(day(2099, 1, 1));
        let status = model.check(&fact("algorithms", day(2000, 1, 1)));
        assert!(!status.expired);
        assert_eq!(status.expires_at, None);
        assert_eq!(status.warning, None);
    }

    #[test]
    fn test_healthy_fact() {
        let model = ExpirationModel::default_policy().at(day(2026, 2, 1));
        let status = model.check(&fact("security", day(2026, 1, 1)));
        assert!(!status.expired);
        assert!(!status.expiring_soon);
        assert_eq!(status.days_remaining, Some(149));
        assert!(status.warning.is_none());
    }

    #[test]
    fn test_expiring_soon_window() {
        let model = ExpirationModel::default_policy().at(day(2026, 6, 1));
        let status = model.check(&fact("security", day(2026, 1, 1)));
        assert!(status.expiring_soon);
        assert_eq!(status.days_remaining, Some(29));
        assert!(status.warning.unwrap().contains("29"));
    }

    #[test]
    fn test_expired_on_the_day() {
        let model = ExpirationModel::default_policy().at(day(2026, 6, 30));
        let status = model.check(&fact("security", day(2026, 1, 1)));
        assert!(status.expired);
        assert_eq!(status.days_remaining, Some(0));
        assert!(status.warning.is_some());
    }

    #[test]
    fn test_stored_expiry_wins() {
        let model = ExpirationModel::default_policy().at(day(2026, 2, 1));
        let mut f = fact("algorithms", day(2026, 1, 1));
        f.expires_at = Some(day(2026, 1, 15));
        assert!(model.check(&f).expired);
    }

    #[test]
    fn test_custom_soon_window() {
        let model = ExpirationModel::default_policy()
            .at(day(2026, 2, 1))
            .with_soon_days(200);
        assert!(model.check(&fact("security", day(2026, 1, 1))).expiring_soon);
    }
}
