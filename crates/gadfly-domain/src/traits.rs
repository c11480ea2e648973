//! Trait definitions for persistence
//!
//! These traits define the boundary between domain logic and storage.
//! Implementations live in `gadfly-store`; the coach and janitor only see the traits.
//!
//! Every method takes `&mut self`: stores read their backing document lazily on
//! first access, so even a read may load state.

use crate::expiration::ExpirationChecker;
use crate::fact::{Fact, FactDraft, FactQuery};
use crate::graph::{AuditReport, GraphStats};
use crate::profile::{DomainProfile, DomainSummary, ProfileBook, ResultRecord};
use crate::rating::Outcome;
use chrono::{DateTime, Utc};

/// Trait for storing per-domain rating profiles
pub trait ProfileStore {
    /// Error type for store operations
    type Error;

    /// Get a profile, creating the zero-trust default on first access
    fn get_domain(&mut self, domain: &str) -> Result<DomainProfile, Self::Error>;

    /// Apply an already-computed rating update and its bookkeeping
    fn record_result(
        &mut self,
        domain: &str,
        outcome: Outcome,
        record: ResultRecord,
    ) -> Result<DomainProfile, Self::Error>;

    /// Store a self-declared rating and reset uncertainty
    fn set_provisional(&mut self, domain: &str, rating: f64) -> Result<DomainProfile, Self::Error>;

    /// Count a new session for every active domain
    fn increment_session(&mut self) -> Result<usize, Self::Error>;

    /// Grow one domain's deviation for the time it has been idle
    fn decay_idle(&mut self, domain: &str, now: DateTime<Utc>) -> Result<bool, Self::Error>;

    /// Snapshot of every profile
    fn profiles(&mut self) -> Result<ProfileBook, Self::Error>;

    /// All domains, most recently active first, with trends
    fn get_summary(&mut self) -> Result<Vec<DomainSummary>, Self::Error>;
}

/// Trait for storing facts in the knowledge graph
pub trait FactStore {
    /// Error type for store operations
    type Error;

    /// Insert a fact, or update the existing one with the same (claim, domain)
    fn add(&mut self, draft: FactDraft) -> Result<Fact, Self::Error>;

    /// Facts matching a filter
    fn query(&mut self, query: &FactQuery) -> Result<Vec<Fact>, Self::Error>;

    /// Partition every fact by expiry
    fn audit(&mut self, checker: &dyn ExpirationChecker) -> Result<AuditReport, Self::Error>;

    /// Remove expired facts, returning how many went
    fn prune(&mut self, checker: &dyn ExpirationChecker) -> Result<usize, Self::Error>;

    /// Counts by domain and status
    fn stats(&mut self) -> Result<GraphStats, Self::Error>;
}
