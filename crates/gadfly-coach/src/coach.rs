//! The Coach ties evaluator, rating math, store and pedagogy together

use crate::evaluator::{ChallengeContext, ChallengeEvaluator};
use crate::pedagogy::{self, Event};
use crate::router::{LlmRouter, RouteDecision};
use crate::CoachError;
use gadfly_domain::rating::{self, RatingUpdate, MAX_RATING, MIN_RATING};
use gadfly_domain::traits::ProfileStore;
use gadfly_domain::{DomainPolicy, DomainProfile, DomainSummary, Outcome, ResultRecord};
use serde::Serialize;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What recording an outcome produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeReport {
    /// Domain the outcome was recorded in
    pub domain: String,
    /// The outcome
    pub outcome: Outcome,
    /// Rating update that was applied
    pub update: RatingUpdate,
    /// Profile after the update
    pub profile: DomainProfile,
    /// Feedback for the user
    pub message: String,
    /// Losing streak detected after this outcome
    pub tilt_detected: bool,
}

/// Challenge and scoring front door over a profile store
pub struct Coach<S: ProfileStore> {
    store: S,
    policy: Arc<DomainPolicy>,
    evaluator: ChallengeEvaluator,
    router: LlmRouter,
}

impl<S> Coach<S>
where
    S: ProfileStore,
    S::Error: Display,
{
    /// Create a coach over `store`
    pub fn new(store: S, policy: Arc<DomainPolicy>) -> Self {
        Self {
            store,
            evaluator: ChallengeEvaluator::new(policy.clone()),
            router: LlmRouter::new(policy.clone()),
            policy,
        }
    }

    /// Replace the challenge evaluator
    pub fn with_evaluator(mut self, evaluator: ChallengeEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Give the store back
    pub fn into_store(self) -> S {
        self.store
    }

    fn profile(&mut self, domain: &str) -> Result<DomainProfile, CoachError> {
        self.store.get_domain(domain).map_err(store_error)
    }

    /// How to challenge the next claim in `domain`
    pub fn challenge(&mut self, domain: &str) -> Result<ChallengeContext, CoachError> {
        let profile = self.profile(domain)?;
        let context = self.evaluator.evaluate(domain, &profile);
        if context.tilt_detected {
            warn!(
                domain,
                streak = profile.blocked_streak,
                "Tilt detected, softening challenges"
            );
        }
        debug!(
            domain,
            style = context.challenge_style.as_str(),
            scaffold = context.scaffold_level.as_str(),
            "Challenge evaluated"
        );
        Ok(context)
    }

    /// Score a challenged claim and persist the result
    pub fn record_outcome(
        &mut self,
        domain: &str,
        outcome: Outcome,
        excerpt: Option<&str>,
    ) -> Result<OutcomeReport, CoachError> {
        let before = self.profile(domain)?;
        let k = self.policy.k_factor(domain);
        let update = rating::update(before.rating, before.rd, outcome, k);
        let blocked_label = self.policy.blocked_label(before.rating).to_string();

        let record = ResultRecord {
            delta: update.delta,
            new_rating: update.new_rating,
            new_rd: update.new_rd,
            blocked_reason: (outcome == Outcome::Blocked).then(|| blocked_label.clone()),
            excerpt: excerpt.map(str::to_string),
        };
        let after = self
            .store
            .record_result(domain, outcome, record)
            .map_err(store_error)?;

        let snapshot = self.evaluator.snapshot(domain, &after);
        let message = pedagogy::render(
            Event::Outcome {
                outcome,
                delta: update.delta,
                blocked_label: &blocked_label,
            },
            &snapshot,
        );

        if snapshot.tilt_detected {
            warn!(domain, streak = after.blocked_streak, "Tilt detected");
        }
        info!(
            domain,
            outcome = outcome.as_str(),
            delta = update.delta,
            rating = after.rating,
            "Outcome recorded"
        );

        Ok(OutcomeReport {
            domain: domain.to_string(),
            outcome,
            update,
            tilt_detected: snapshot.tilt_detected,
            profile: after,
            message,
        })
    }

    /// Same as [`Coach::record_outcome`] from a raw score of 0, 0.5 or 1
    pub fn record_score(
        &mut self,
        domain: &str,
        score: f64,
        excerpt: Option<&str>,
    ) -> Result<OutcomeReport, CoachError> {
        let outcome = Outcome::from_score(score)?;
        self.record_outcome(domain, outcome, excerpt)
    }

    /// Store a self-declared rating
    pub fn declare(&mut self, domain: &str, rating: f64) -> Result<DomainProfile, CoachError> {
        if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(CoachError::InvalidRating(rating));
        }
        self.store
            .set_provisional(domain, rating)
            .map_err(store_error)
    }

    /// Count a new session for every active domain
    pub fn start_session(&mut self) -> Result<usize, CoachError> {
        let bumped = self.store.increment_session().map_err(store_error)?;
        info!(domains = bumped, "Session started");
        Ok(bumped)
    }

    /// Model tier for the current profiles
    pub fn route(&mut self) -> Result<RouteDecision, CoachError> {
        let profiles = self.store.profiles().map_err(store_error)?;
        Ok(self.router.route(&profiles))
    }

    /// All domains, most recent first
    pub fn summary(&mut self) -> Result<Vec<DomainSummary>, CoachError> {
        self.store.get_summary().map_err(store_error)
    }
}

fn store_error<E: Display>(e: E) -> CoachError {
    CoachError::Store(e.to_string())
}
