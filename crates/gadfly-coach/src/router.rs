//! Model routing - which model tier a session needs
//!
//! A user who is strong in some active domain needs less help from the model,
//! so the strongest active rating picks the tier.

use gadfly_domain::{DomainPolicy, ModelTier, ProfileBook};
use serde::Serialize;
use std::sync::Arc;

/// Routing decision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDecision {
    /// Recommended tier
    pub tier: ModelTier,
    /// Rating that decided it (0 when no domain is active)
    pub rating: f64,
    /// Domain that decided it
    pub domain: Option<String>,
}

/// Picks a model tier from the profiles
#[derive(Debug, Clone)]
pub struct LlmRouter {
    policy: Arc<DomainPolicy>,
}

impl LlmRouter {
    /// Create a router reading breakpoints from `policy`
    pub fn new(policy: Arc<DomainPolicy>) -> Self {
        Self { policy }
    }

    /// Route on the highest rating among domains with at least one session
    ///
    /// Ties go to the domain that sorts first. With no active domain the
    /// frontier tier is recommended.
    pub fn route(&self, profiles: &ProfileBook) -> RouteDecision {
        let best = profiles
            .iter()
            .filter(|(_, p)| p.session_count >= 1)
            .fold(None::<(&str, f64)>, |best, (name, p)| match best {
                Some((_, rating)) if rating >= p.rating => best,
                _ => Some((name, p.rating)),
            });

        match best {
            Some((domain, rating)) => RouteDecision {
                tier: self.policy.model_tier(rating),
                rating,
                domain: Some(domain.to_string()),
            },
            None => RouteDecision {
                tier: ModelTier::Frontier,
                rating: 0.0,
                domain: None,
            },
        }
    }
}
