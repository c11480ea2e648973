//! Gadfly Gatekeeper
//!
//! Judges the evidence behind a claim before it reaches the knowledge graph.
//!
//! The Gatekeeper provides:
//! - Evidence scoring (tier 1-5 to a confidence score)
//! - Strict domain minimums (security refuses anything weaker than tier 2)
//! - Trigger phrase scanning for unverified language, in English and French
//! - The fact status a reviewed claim should be stored with
//!
//! A policy rejection is a normal result (`VerdictStatus::Blocked`), not an error.
//!
//! # Examples
//!
//! ```
//! use gadfly_domain::EvidenceTier;
//! use gadfly_gatekeeper::{Gatekeeper, VerdictStatus};
//!
//! let gatekeeper = Gatekeeper::default_config();
//! let verdict = gatekeeper.assess(EvidenceTier::new(3).unwrap(), "security");
//! assert_eq!(verdict.status, VerdictStatus::Blocked);
//! assert_eq!(verdict.score, 65);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod triggers;
mod verdict;

pub use config::GatekeeperConfig;
pub use error::GatekeeperError;
pub use triggers::{TriggerCategory, TriggerDetector, TriggerMatch, EXCERPT_RADIUS};
pub use verdict::{BlockReason, ClaimReview, EvidenceVerdict, Gatekeeper, VerdictStatus};
