//! Gadfly Coach
//!
//! Decides how to challenge a user's claims and turns outcomes into rating
//! changes and feedback.
//!
//! - [`ChallengeEvaluator`]: scaffold level, challenge style, tilt and dead-zone flags
//! - [`LlmRouter`]: model tier from the strongest active domain
//! - [`pedagogy`]: the wording, as pure functions
//! - [`Coach`]: the three above over a [`ProfileStore`](gadfly_domain::traits::ProfileStore)
//!
//! # Examples
//!
//! ```no_run
//! use gadfly_coach::Coach;
//! use gadfly_domain::{DomainPolicy, Outcome};
//! use gadfly_store::RatingStore;
//! use std::sync::Arc;
//!
//! let mut coach = Coach::new(RatingStore::open("ratings.json"), Arc::new(DomainPolicy::default()));
//! let context = coach.challenge("security").unwrap();
//! println!("{}", context.instructions);
//!
//! let report = coach.record_outcome("security", Outcome::Validated, None).unwrap();
//! println!("{}", report.message);
//! ```

#![warn(missing_docs)]

mod coach;
mod error;
mod evaluator;
pub mod pedagogy;
mod router;

pub use coach::{Coach, OutcomeReport};
pub use error::CoachError;
pub use evaluator::{ChallengeContext, ChallengeEvaluator, TILT_THRESHOLD};
pub use router::{LlmRouter, RouteDecision};
