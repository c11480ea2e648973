//! Knowledge graph bookkeeping - audit partitions and statistics over facts
//!
//! These are pure functions over a fact list; the store crate calls them on its
//! in-memory document.

use crate::expiration::{ExpirationChecker, ExpirationStatus};
use crate::fact::{Fact, FactStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// A fact together with its expiration status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditedFact {
    /// The fact
    pub fact: Fact,
    /// How it stands
    pub status: ExpirationStatus,
}

/// Facts partitioned by expiry
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuditReport {
    /// Past their expiry
    pub expired: Vec<AuditedFact>,
    /// Inside the warning window
    pub expiring_soon: Vec<AuditedFact>,
    /// Everything else, including facts that never expire
    pub healthy: Vec<AuditedFact>,
}

impl AuditReport {
    /// Total number of facts audited
    pub fn total(&self) -> usize {
        self.expired.len() + self.expiring_soon.len() + self.healthy.len()
    }

    /// Check if nothing has expired
    pub fn passed(&self) -> bool {
        self.expired.is_empty()
    }
}

/// Counts over the whole graph
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphStats {
    /// Number of facts
    pub total: usize,
    /// Facts per domain
    pub by_domain: BTreeMap<String, usize>,
    /// Facts per status
    pub by_status: BTreeMap<FactStatus, usize>,
}

/// Partition facts into expired, expiring soon and healthy
pub fn audit<'a, I>(facts: I, checker: &dyn ExpirationChecker) -> AuditReport
where
    I: IntoIterator<Item = &'a Fact>,
{
    let mut report = AuditReport::default();
    for fact in facts {
        let status = checker.check(fact);
        let bucket = if status.expired {
            &mut report.expired
        } else if status.expiring_soon {
            &mut report.expiring_soon
        } else {
            &mut report.healthy
        };
        bucket.push(AuditedFact {
            fact: fact.clone(),
            status,
        });
    }
    report
}

/// Count facts by domain and by status
pub fn stats<'a, I>(facts: I) -> GraphStats
where
    I: IntoIterator<Item = &'a Fact>,
{
    let mut stats = GraphStats::default();
    for fact in facts {
        stats.total += 1;
        *stats.by_domain.entry(fact.domain.clone()).or_insert(0) += 1;
        *stats.by_status.entry(fact.status).or_insert(0) += 1;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiration::ExpirationModel;
    use crate::fact::FactId;
    use chrono::{DateTime, TimeZone, Utc};

    fn fact(claim: &str, domain: &str, status: FactStatus, created_at: DateTime<Utc>) -> Fact {
        Fact {
            id: FactId::from_content(claim, domain),
            claim: claim.to_string(),
            domain: domain.to_string(),
            status,
            confidence: 80.0,
            source: None,
            proof: None,
            session_id: None,
            created_at,
            updated_at: created_at,
            expires_at: None,
        }
    }

    #[test]
    fn test_audit_partitions() {
        let now = Utc.with_ymd_and_hms(2026, 6, 15, 0, 0, 0).unwrap();
        let model = ExpirationModel::default_policy().at(now);
        let facts = vec![
            fact("old", "performance", FactStatus::Verified, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
            fact("soon", "security", FactStatus::Claim, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()),
            fact("fresh", "security", FactStatus::Claim, now),
            fact("timeless", "algorithms", FactStatus::Verified, Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap()),
        ];

        let report = audit(&facts, &model);
        assert_eq!(report.expired.len(), 1);
        assert_eq!(report.expired[0].fact.claim, "old");
        assert_eq!(report.expiring_soon.len(), 1);
        assert_eq!(report.expiring_soon[0].fact.claim, "soon");
        assert_eq!(report.healthy.len(), 2);
        assert_eq!(report.total(), 4);
        assert!(!report.passed());
    }

    #[test]
    fn test_stats() {
        let now = Utc::now();
        let facts = vec![
            fact("a", "security", FactStatus::Verified, now),
            fact("b", "security", FactStatus::Blocked, now),
            fact("c", "algorithms", FactStatus::Verified, now),
        ];
        let stats = stats(&facts);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_domain["security"], 2);
        assert_eq!(stats.by_status[&FactStatus::Verified], 2);
        assert_eq!(stats.by_status.get(&FactStatus::Opinion), None);
    }
}
