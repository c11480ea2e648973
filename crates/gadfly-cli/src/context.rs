//! Opens the stores and services a command needs from the configuration.

use crate::config::Config;
use crate::error::Result;
use gadfly_coach::Coach;
use gadfly_domain::{DomainPolicy, ExpirationModel};
use gadfly_gatekeeper::Gatekeeper;
use gadfly_janitor::Janitor;
use gadfly_store::{KnowledgeGraph, RatingStore};
use std::sync::Arc;

/// Everything built from one configuration.
pub struct Context {
    config: Config,
    policy: Arc<DomainPolicy>,
}

impl Context {
    /// Create a context sharing one policy across services.
    pub fn new(config: Config) -> Self {
        let policy = Arc::new(config.policy.clone());
        Self { config, policy }
    }

    /// The configuration in effect.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared domain policy.
    pub fn policy(&self) -> Arc<DomainPolicy> {
        self.policy.clone()
    }

    /// Expiration model against the wall clock.
    pub fn expiration(&self) -> ExpirationModel {
        ExpirationModel::new(self.policy.clone())
            .with_soon_days(self.config.janitor.expiring_soon_days)
    }

    /// Coach over the ratings document.
    pub fn coach(&self) -> Result<Coach<RatingStore>> {
        let store = RatingStore::open(self.config.ratings_path()?);
        Ok(Coach::new(store, self.policy.clone()))
    }

    /// Ratings document on its own.
    pub fn ratings(&self) -> Result<RatingStore> {
        Ok(RatingStore::open(self.config.ratings_path()?))
    }

    /// Knowledge graph document.
    pub fn graph(&self) -> Result<KnowledgeGraph> {
        Ok(KnowledgeGraph::open(self.config.graph_path()?, self.expiration()))
    }

    /// Gatekeeper with the configured thresholds.
    pub fn gatekeeper(&self) -> Result<Gatekeeper> {
        Ok(Gatekeeper::new(self.config.gatekeeper.clone(), self.policy.clone())?)
    }

    /// Janitor with the configured sweep settings.
    pub fn janitor(&self, dry_run: bool) -> Janitor {
        let mut config = self.config.janitor.clone();
        config.dry_run |= dry_run;
        Janitor::new(config, self.policy.clone())
    }
}
