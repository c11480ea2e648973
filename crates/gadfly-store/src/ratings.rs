use crate::document::{self, RatingsDocument};
use crate::error::StoreError;
use chrono::{DateTime, Utc};
use gadfly_domain::traits::ProfileStore;
use gadfly_domain::{
    normalize_domain, DomainProfile, DomainSummary, Outcome, ProfileBook, ResultRecord,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed store of per-domain rating profiles
///
/// Domain names are normalized (trimmed, lowercased) before lookup, so
/// `"Security"` and `"security"` share one profile.
#[derive(Debug)]
pub struct RatingStore {
    path: PathBuf,
    document: Option<RatingsDocument>,
}

impl RatingStore {
    /// Open a store backed by `path`; nothing is read until first access
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document: None,
        }
    }

    /// Backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loaded document, reading the file on first call
    pub fn document(&mut self) -> Result<&mut RatingsDocument, StoreError> {
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

    /// Apply a result stamped at `now` instead of the wall clock
    pub fn record_result_at(
        &mut self,
        domain: &str,
        outcome: Outcome,
        record: ResultRecord,
        now: DateTime<Utc>,
    ) -> Result<DomainProfile, StoreError> {
        let domain = normalize_domain(domain);
        let document = self.document()?;
        let (profile, _) = document.domains.get_or_create(&domain);
        profile.apply_result(outcome, record, now);
        let snapshot = profile.clone();
        self.flush()?;

        debug!(
            domain = %domain,
            outcome = %outcome,
            rating = snapshot.rating,
            rd = snapshot.rd,
            "Recorded result"
        );
        Ok(snapshot)
    }
}

impl ProfileStore for RatingStore {
    type Error = StoreError;

    fn get_domain(&mut self, domain: &str) -> Result<DomainProfile, Self::Error> {
        let domain = normalize_domain(domain);
        let (profile, created) = self.document()?.domains.get_or_create(&domain);
        let snapshot = profile.clone();
        if created {
            debug!(domain = %domain, "Created zero-trust profile");
            self.flush()?;
        }
        Ok(snapshot)
    }

    fn record_result(
        &mut self,
        domain: &str,
        outcome: Outcome,
        record: ResultRecord,
    ) -> Result<DomainProfile, Self::Error> {
        self.record_result_at(domain, outcome, record, Utc::now())
    }

    fn set_provisional(&mut self, domain: &str, rating: f64) -> Result<DomainProfile, Self::Error> {
        let domain = normalize_domain(domain);
        let (profile, _) = self.document()?.domains.get_or_create(&domain);
        profile.set_provisional(rating);
        let snapshot = profile.clone();
        self.flush()?;

        info!(domain = %domain, rating = snapshot.rating, "Provisional rating declared");
        Ok(snapshot)
    }

    fn increment_session(&mut self) -> Result<usize, Self::Error> {
        let bumped = self.document()?.domains.increment_sessions();
        if bumped > 0 {
            self.flush()?;
        }
        debug!(domains = bumped, "Session counted");
        Ok(bumped)
    }

    fn decay_idle(&mut self, domain: &str, now: DateTime<Utc>) -> Result<bool, Self::Error> {
        let domain = normalize_domain(domain);
        let changed = match self.document()?.domains.get_mut(&domain) {
            Some(profile) => profile.decay_idle(now),
            None => false,
        };
        if changed {
            self.flush()?;
        }
        Ok(changed)
    }

    fn profiles(&mut self) -> Result<ProfileBook, Self::Error> {
        Ok(self.document()?.domains.clone())
    }

    fn get_summary(&mut self) -> Result<Vec<DomainSummary>, Self::Error> {
        Ok(self.document()?.domains.summary())
    }
}
