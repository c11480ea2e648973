use crate::document::{self, GraphDocument};
use crate::error::StoreError;
use chrono::{DateTime, Utc};
use gadfly_domain::graph::{self, AuditReport, GraphStats};
use gadfly_domain::traits::FactStore;
use gadfly_domain::{
    normalize_domain, ExpirationChecker, ExpirationModel, Fact, FactDraft, FactQuery,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed knowledge graph of facts
///
/// Facts are keyed by the content hash of (claim, domain). Adding the same pair
/// twice updates the stored fact instead of duplicating it.
#[derive(Debug)]
pub struct KnowledgeGraph {
    path: PathBuf,
    expiration: ExpirationModel,
    document: Option<GraphDocument>,
}

impl KnowledgeGraph {
    /// Open a graph backed by `path`, stamping new facts with `expiration`
    pub fn open(path: impl Into<PathBuf>, expiration: ExpirationModel) -> Self {
        Self {
            path: path.into(),
            expiration,
            document: None,
        }
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loaded document, reading the file on first call
    pub fn document(&mut self) -> Result<&mut GraphDocument, StoreError> {
        let document = match self.document.take() {
            Some(document) => document,
            None => document::load(&self.path)?,
        };
        Ok(self.document.insert(document))
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if let Some(document) = self.document.as_mut() {
            document.last_updated = Some(Utc::now());
            document::flush(&self.path, document)?;
        }
        Ok(())
    }

    /// Add or update a fact, stamping it at `now`
    pub fn add_at(&mut self, draft: FactDraft, now: DateTime<Utc>) -> Result<Fact, StoreError> {
        draft.validate()?;

        let id = draft.id();
        let domain = normalize_domain(&draft.domain);
        let claim = draft.claim.trim().to_string();
        // A re-asserted fact starts a fresh half-life from the assertion time
        let asserted_at = draft.created_at.unwrap_or(now);
        let expires_at = self.expiration.expires_at(&domain, asserted_at);

        let document = self.document()?;
        let fact = match document.facts.iter_mut().find(|f| f.id == id) {
            Some(existing) => {
                existing.status = draft.status;
                existing.confidence = draft.confidence;
                if draft.source.is_some() {
                    existing.source = draft.source;
                }
                if draft.proof.is_some() {
                    existing.proof = draft.proof;
                }
                if draft.session_id.is_some() {
                    existing.session_id = draft.session_id;
                }
                existing.updated_at = now;
                existing.expires_at = expires_at;
                debug!(id = %id, "Updated existing fact");
                existing.clone()
            }
            None => {
                let fact = Fact {
                    id: id.clone(),
                    claim,
                    domain,
                    status: draft.status,
                    confidence: draft.confidence,
                    source: draft.source,
                    proof: draft.proof,
                    session_id: draft.session_id,
                    created_at: asserted_at,
                    updated_at: now,
                    expires_at,
                };
                document.facts.push(fact.clone());
                debug!(id = %id, domain = %fact.domain, "Added fact");
                fact
            }
        };

        self.flush()?;
        Ok(fact)
    }

    /// Number of stored facts
    pub fn len(&mut self) -> Result<usize, StoreError> {
        Ok(self.document()?.facts.len())
    }

    /// Check if the graph holds no facts
    pub fn is_empty(&mut self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl FactStore for KnowledgeGraph {
    type Error = StoreError;

    fn add(&mut self, draft: FactDraft) -> Result<Fact, Self::Error> {
        self.add_at(draft, Utc::now())
    }

    fn query(&mut self, query: &FactQuery) -> Result<Vec<Fact>, Self::Error> {
        let now = self.expiration.now();
        let mut query = query.clone();
        query.domain = query.domain.as_deref().map(normalize_domain);

        Ok(self
            .document()?
            .facts
            .iter()
            .filter(|fact| query.matches(fact, now))
            .cloned()
            .collect())
    }

    fn audit(&mut self, checker: &dyn ExpirationChecker) -> Result<AuditReport, Self::Error> {
        Ok(graph::audit(&self.document()?.facts, checker))
    }

    fn prune(&mut self, checker: &dyn ExpirationChecker) -> Result<usize, Self::Error> {
        let facts = &mut self.document()?.facts;
        let before = facts.len();
        facts.retain(|fact| !checker.check(fact).expired);
        let pruned = before - facts.len();

        if pruned > 0 {
            self.flush()?;
            info!(pruned, "Pruned expired facts");
        }
        Ok(pruned)
    }

    fn stats(&mut self) -> Result<GraphStats, Self::Error> {
        Ok(graph::stats(&self.document()?.facts))
    }
}
