//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use gadfly_domain::DomainPolicy;
use gadfly_gatekeeper::GatekeeperConfig;
use gadfly_janitor::JanitorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Ratings document file name inside the data directory.
pub const RATINGS_FILE: &str = "ratings.json";

/// Knowledge graph file name inside the data directory.
pub const GRAPH_FILE: &str = "graph.json";

/// CLI configuration.
///
/// ```toml
/// data_dir = "/var/lib/gadfly"
///
/// [settings]
/// color = false
/// format = "json"
///
/// [policy.k_multipliers]
/// security = 2.0
///
/// [gatekeeper]
/// min_score = 50
///
/// [janitor]
/// dry_run = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the ratings and graph documents live (default `~/.gadfly`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Domain policy table
    #[serde(default)]
    pub policy: DomainPolicy,

    /// Evidence review settings
    #[serde(default)]
    pub gatekeeper: GatekeeperConfig,

    /// Maintenance sweep settings
    #[serde(default)]
    pub janitor: JanitorConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default gadfly home directory.
    pub fn home() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".gadfly"))
    }

    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::home()?.join("config.toml"))
    }

    /// Load configuration from `path`, or from the default path.
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if !path.exists() => Err(CliError::Config(format!(
                "Config file {} does not exist",
                path.display()
            ))),
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check the nested sections.
    pub fn validate(&self) -> Result<()> {
        self.gatekeeper.validate()?;
        self.janitor.validate()?;
        Ok(())
    }

    /// Directory holding the documents.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::home(),
        }
    }

    /// Path of the ratings document.
    pub fn ratings_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(RATINGS_FILE))
    }

    /// Path of the knowledge graph document.
    pub fn graph_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(GRAPH_FILE))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.policy, DomainPolicy::default());
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_partial_file_overrides_only_what_it_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
data_dir = "/tmp/gadfly-data"

[settings]
format = "json"

[policy]
default_half_life_days = 30

[janitor]
dry_run = true
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
        assert_eq!(config.policy.half_life_days("gardening"), Some(30));
        assert_eq!(config.policy.half_life_days("security"), Some(180));
        assert!(config.janitor.dry_run);
        assert_eq!(config.gatekeeper, GatekeeperConfig::default());
        assert_eq!(
            config.graph_path().unwrap(),
            PathBuf::from("/tmp/gadfly-data").join(GRAPH_FILE)
        );
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_invalid_section_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[janitor]\nexpiring_soon_days = -3\n").unwrap();
        assert!(matches!(Config::load(Some(&path)), Err(CliError::Janitor(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.data_dir = Some(dir.path().to_path_buf());
        config.settings.color = false;
        config.save_to(&path).unwrap();

        let reloaded = Config::load(Some(&path)).unwrap();
        assert!(!reloaded.settings.color);
        assert_eq!(reloaded.data_dir, config.data_dir);
        assert_eq!(reloaded.policy, config.policy);
    }
}
