//! Core Janitor implementation: expiry pruning and idle decay

use crate::{JanitorConfig, JanitorError, JanitorMetrics};
use chrono::{DateTime, Utc};
use gadfly_domain::traits::{FactStore, ProfileStore};
use gadfly_domain::{DomainPolicy, ExpirationModel};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info};

/// Janitor for the knowledge graph and the rating profiles
///
/// One sweep:
/// 1. Audits every fact against its domain half-life
/// 2. Prunes the expired ones
/// 3. Grows the rating deviation of every active domain for its idle time
///
/// In dry-run mode steps 2 and 3 are only reported.
///
/// # Examples
///
/// ```no_run
/// use gadfly_domain::ExpirationModel;
/// use gadfly_janitor::Janitor;
/// use gadfly_store::{KnowledgeGraph, RatingStore};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut graph = KnowledgeGraph::open("graph.json", ExpirationModel::default_policy());
/// let mut ratings = RatingStore::open("ratings.json");
/// let mut janitor = Janitor::default_config();
///
/// let metrics = janitor.sweep(&mut graph, &mut ratings)?;
/// println!("{}", metrics.summary());
/// # Ok(())
/// # }
/// ```
pub struct Janitor {
    config: JanitorConfig,
    policy: Arc<DomainPolicy>,
    metrics: JanitorMetrics,
}

impl Janitor {
    /// Create a new Janitor reading half-lives from `policy`
    pub fn new(config: JanitorConfig, policy: Arc<DomainPolicy>) -> Self {
        Self {
            config,
            policy,
            metrics: JanitorMetrics::new(),
        }
    }

    /// Create a Janitor with default configuration and policy
    pub fn default_config() -> Self {
        Self::new(JanitorConfig::default(), Arc::new(DomainPolicy::default()))
    }

    /// Active configuration
    pub fn config(&self) -> &JanitorConfig {
        &self.config
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &JanitorMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Perform a complete sweep against the wall clock
    pub fn sweep<G, P>(&mut self, graph: &mut G, ratings: &mut P) -> Result<JanitorMetrics, JanitorError>
    where
        G: FactStore,
        G::Error: Display,
        P: ProfileStore,
        P::Error: Display,
    {
        self.sweep_at(graph, ratings, Utc::now())
    }

    /// Perform a complete sweep as of `now`
    ///
    /// Returns the updated metrics after the sweep.
    pub fn sweep_at<G, P>(
        &mut self,
        graph: &mut G,
        ratings: &mut P,
        now: DateTime<Utc>,
    ) -> Result<JanitorMetrics, JanitorError>
    where
        G: FactStore,
        G::Error: Display,
        P: ProfileStore,
        P::Error: Display,
    {
        self.config.validate()?;

        self.sweep_facts(graph, now)?;
        if self.config.decay_idle {
            self.decay_profiles(ratings, now)?;
        }

        self.metrics.record_sweep(now);
        info!(
            sweep = self.metrics.sweep_count,
            dry_run = self.config.dry_run,
            expired = self.metrics.facts_expired,
            expiring_soon = self.metrics.facts_expiring_soon,
            "Janitor sweep complete"
        );
        Ok(self.metrics.clone())
    }

    fn checker(&self, now: DateTime<Utc>) -> ExpirationModel {
        ExpirationModel::new(self.policy.clone())
            .with_soon_days(self.config.expiring_soon_days)
            .at(now)
    }

    fn sweep_facts<G>(&mut self, graph: &mut G, now: DateTime<Utc>) -> Result<usize, JanitorError>
    where
        G: FactStore,
        G::Error: Display,
    {
        let checker = self.checker(now);
        let report = graph
            .audit(&checker)
            .map_err(|e| JanitorError::Graph(e.to_string()))?;
        self.metrics
            .record_audit(report.expired.len(), report.expiring_soon.len());

        if report.expired.is_empty() {
            return Ok(0);
        }

        if self.config.dry_run {
            for audited in &report.expired {
                info!(id = %audited.fact.id, domain = %audited.fact.domain, "DRY RUN: Would prune fact");
            }
            return Ok(0);
        }

        let pruned = graph
            .prune(&checker)
            .map_err(|e| JanitorError::Graph(e.to_string()))?;
        self.metrics.record_pruned(pruned);
        Ok(pruned)
    }

    fn decay_profiles<P>(&mut self, ratings: &mut P, now: DateTime<Utc>) -> Result<usize, JanitorError>
    where
        P: ProfileStore,
        P::Error: Display,
    {
        let book = ratings
            .profiles()
            .map_err(|e| JanitorError::Ratings(e.to_string()))?;

        let mut decayed = 0;
        for (domain, profile) in book.iter().filter(|(_, p)| p.is_active()) {
            if self.config.dry_run {
                let mut preview = profile.clone();
                if preview.decay_idle(now) {
                    info!(domain, from = profile.rd, to = preview.rd, "DRY RUN: Would decay deviation");
                }
                continue;
            }

            let changed = ratings
                .decay_idle(domain, now)
                .map_err(|e| JanitorError::Ratings(e.to_string()))?;
            if changed {
                debug!(domain, "Deviation decayed");
                self.metrics.record_decay();
                decayed += 1;
            }
        }
        Ok(decayed)
    }
}
