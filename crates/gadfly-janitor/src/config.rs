//! Configuration for Janitor operations

use crate::JanitorError;
use gadfly_domain::expiration::EXPIRING_SOON_DAYS;
use serde::{Deserialize, Serialize};

/// Configuration for the Janitor
///
/// # Examples
///
/// ```
/// use gadfly_janitor::JanitorConfig;
///
/// let config = JanitorConfig::default();
/// assert_eq!(config.expiring_soon_days, 30);
///
/// // Warn earlier, decay uncertainty
/// let config = JanitorConfig::aggressive();
/// assert_eq!(config.expiring_soon_days, 60);
///
/// // Warn late, leave uncertainty alone
/// let config = JanitorConfig::lenient();
/// assert!(!config.decay_idle);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JanitorConfig {
    /// Days before expiry at which a fact counts as expiring soon
    /// Default: 30
    pub expiring_soon_days: i64,

    /// Dry-run mode: report what would change without writing anything
    /// Default: false
    pub dry_run: bool,

    /// Grow rating deviation for domains that have been idle
    /// Default: true
    pub decay_idle: bool,
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            expiring_soon_days: EXPIRING_SOON_DAYS,
            dry_run: false,
            decay_idle: true,
        }
    }
}

impl JanitorConfig {
    /// Wider warning window, decay on
    pub fn aggressive() -> Self {
        Self {
            expiring_soon_days: 60,
            dry_run: false,
            decay_idle: true,
        }
    }

    /// Narrow warning window, decay off
    pub fn lenient() -> Self {
        Self {
            expiring_soon_days: 7,
            dry_run: false,
            decay_idle: false,
        }
    }

    /// Same configuration in dry-run mode
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), JanitorError> {
        if self.expiring_soon_days < 0 {
            return Err(JanitorError::Config(format!(
                "expiring_soon_days must not be negative, got {}",
                self.expiring_soon_days
            )));
        }
        Ok(())
    }

    /// Parse a `[janitor]`-style TOML table
    pub fn from_toml(text: &str) -> Result<Self, JanitorError> {
        let config: Self =
            toml::from_str(text).map_err(|e| JanitorError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, JanitorError> {
        toml::to_string_pretty(self).map_err(|e| JanitorError::Config(e.to_string()))
    }
}
