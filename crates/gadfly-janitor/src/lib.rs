//! Gadfly Janitor
//!
//! Maintenance sweep over the knowledge graph and the rating profiles.
//!
//! # Overview
//!
//! The Janitor is responsible for:
//! - **Expiry audit**: partitioning facts into expired, expiring soon and healthy
//! - **Pruning**: removing facts past their domain half-life
//! - **Idle decay**: growing rating deviation for domains nobody has exercised lately
//! - **Metrics collection**: tracking what each sweep did
//!
//! ## Half-lives
//!
//! | Domain | Half-life |
//! |--------|-----------|
//! | **compliance** | 365 days |
//! | **security**, **infrastructure** | 180 days |
//! | **frameworks** | 120 days |
//! | **performance** | 90 days |
//! | **algorithms** | never expires |
//! | anything else | policy default (365 days) |
//!
//! # Usage
//!
//! ```no_run
//! use gadfly_domain::ExpirationModel;
//! use gadfly_janitor::{Janitor, JanitorConfig};
//! use gadfly_store::{KnowledgeGraph, RatingStore};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = KnowledgeGraph::open("graph.json", ExpirationModel::default_policy());
//! let mut ratings = RatingStore::open("ratings.json");
//! let mut janitor = Janitor::new(JanitorConfig::default().dry_run(), Arc::default());
//!
//! let metrics = janitor.sweep(&mut graph, &mut ratings)?;
//! println!("Would prune {} fact(s)", metrics.facts_expired);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [janitor]
//! expiring_soon_days = 30
//! dry_run = false
//! decay_idle = true
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod janitor;
mod metrics;

pub use config::JanitorConfig;
pub use error::JanitorError;
pub use janitor::Janitor;
pub use metrics::JanitorMetrics;
