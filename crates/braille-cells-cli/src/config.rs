//! Configuration management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the profile store
    #[serde(default = "default_store")]
    pub store: String,

    /// Treat routing keys passed to `route` as 1-based
    #[serde(default)]
    pub one_based_keys: bool,
}

fn default_store() -> String {
    "state/profiles.toml".to_string()
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse configuration")?;
        Ok(config)
    }

    /// Loads configuration, falling back to defaults if the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            debug!("No configuration at {:?}, using defaults", path.as_ref());
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: default_store(),
            one_based_keys: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: Config = toml::from_str("one_based_keys = true").unwrap();
        assert_eq!(config.store, "state/profiles.toml");
        assert!(config.one_based_keys);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.store, default_store());
        assert!(!config.one_based_keys);
    }

    #[test]
    fn test_bad_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "store = ").unwrap();
        assert!(Config::load_or_default(&path).is_err());
    }
}
