//! Gatekeeper configuration

use crate::GatekeeperError;
use serde::{Deserialize, Serialize};

/// Configuration for evidence review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatekeeperConfig {
    /// Enforce per-domain strict minimum tiers
    pub enforce_strict_tiers: bool,

    /// Scan claim text for trigger phrases
    pub scan_triggers: bool,

    /// Weakest tier whose claims are stored as VERIFIED
    pub verified_max_tier: u8,

    /// Evidence score below which any claim is blocked, in every domain
    pub min_score: u8,
}

impl Default for GatekeeperConfig {
    fn default() -> Self {
        Self {
            enforce_strict_tiers: true,
            scan_triggers: true,
            verified_max_tier: 2,
            min_score: 0,
        }
    }
}

impl GatekeeperConfig {
    /// Create a permissive configuration (scores only, nothing blocked)
    pub fn permissive() -> Self {
        Self {
            enforce_strict_tiers: false,
            scan_triggers: false,
            verified_max_tier: 2,
            min_score: 0,
        }
    }

    /// Create a strict configuration (unsourced claims blocked everywhere)
    pub fn strict() -> Self {
        Self {
            enforce_strict_tiers: true,
            scan_triggers: true,
            verified_max_tier: 1,
            min_score: 50,
        }
    }

    /// Check the configuration before building a gatekeeper from it
    pub fn validate(&self) -> Result<(), GatekeeperError> {
        if !(1..=5).contains(&self.verified_max_tier) {
            return Err(GatekeeperError::Config(format!(
                "verified_max_tier must be between 1 and 5, got {}",
                self.verified_max_tier
            )));
        }
        if self.min_score > 100 {
            return Err(GatekeeperError::Config(format!(
                "min_score must be at most 100, got {}",
                self.min_score
            )));
        }
        Ok(())
    }
}
