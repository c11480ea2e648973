//! Gadfly Domain Layer
//!
//! This crate holds the core rules of Gadfly: how a user's competence in a
//! domain is rated, how strong a claim's evidence is, and how long a fact can be
//! trusted. It does no I/O; storage lives behind the traits in [`traits`].
//!
//! ## Key Concepts
//!
//! - **Domain profile**: rating (0-1000) and rating deviation (10-200) per topic
//! - **Outcome**: a challenged claim is validated, partial, or blocked
//! - **Evidence tier**: 1 (official source) to 5 (no source), scored 95 to 20
//! - **Fact**: a claim with status, confidence and a domain-dependent expiry
//! - **Confidence chain**: step confidences compound multiplicatively
//! - **Policy**: every threshold above, as one injectable value
//!
//! ## Architecture
//!
//! - Pure business logic; the only dependencies are serialization, time and hashing
//! - Persistence is behind [`traits::ProfileStore`] and [`traits::FactStore`]
//! - The rating math is independent of profiles and of message formatting

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confidence;
pub mod error;
pub mod evidence;
pub mod expiration;
pub mod fact;
pub mod graph;
pub mod history;
pub mod policy;
pub mod profile;
pub mod rating;
pub mod traits;

// Re-exports for convenience
pub use confidence::{chain, ChainResult, ChainWarning};
pub use error::DomainError;
pub use evidence::EvidenceTier;
pub use expiration::{ExpirationChecker, ExpirationModel, ExpirationStatus};
pub use fact::{Fact, FactDraft, FactId, FactQuery, FactStatus};
pub use graph::{AuditReport, AuditedFact, GraphStats};
pub use history::BoundedHistory;
pub use policy::{normalize_domain, ChallengeStyle, DomainPolicy, ModelTier, ScaffoldLevel};
pub use profile::{DomainProfile, DomainSummary, OutcomeRecord, ProfileBook, ResultRecord, Trend};
pub use rating::{Outcome, RatingUpdate};
