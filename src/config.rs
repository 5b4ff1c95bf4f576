//! Configuration file handling.
//!
//! Settings come from a YAML file with environment-variable and CLI-flag
//! overrides layered on top (flags win). A missing config file is not an
//! error; a malformed one is.

use crate::types::Priority;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an alternate config file.
pub const CONFIG_ENV: &str = "TASKDECK_CONFIG";
/// Environment variable overriding the database path.
pub const DB_ENV: &str = "TASKDECK_DB";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the SQLite database file.
    pub db_path: PathBuf,
    /// Priority assigned by `add` when none is given.
    pub default_priority: Priority,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            default_priority: Priority::Medium,
        }
    }
}

/// Default database location: ~/.taskdeck/tasks.db, or the working directory
/// when no home directory is available.
fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".taskdeck").join("tasks.db"))
        .unwrap_or_else(|| PathBuf::from("tasks.db"))
}

/// Config file location: $TASKDECK_CONFIG, then ~/.taskdeck/config.yaml.
fn default_config_path() -> Option<PathBuf> {
    std::env::var(CONFIG_ENV)
        .ok()
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".taskdeck").join("config.yaml")))
}

impl Config {
    /// Load configuration from the explicit path if given, otherwise from the
    /// discovered location, otherwise built-in defaults. The `TASKDECK_DB`
    /// environment variable overrides the database path either way.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit.map(Path::to_path_buf).or_else(default_config_path);

        let mut config = match path {
            Some(ref p) if p.exists() => {
                debug!(path = %p.display(), "loading config");
                let raw = std::fs::read_to_string(p)
                    .with_context(|| format!("failed to read config {}", p.display()))?;
                serde_yaml::from_str(&raw)
                    .with_context(|| format!("failed to parse config {}", p.display()))?
            }
            _ => Self::default(),
        };

        if let Ok(db) = std::env::var(DB_ENV) {
            config.db_path = PathBuf::from(db);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_medium_priority() {
        let config = Config::default();
        assert_eq!(config.default_priority, Priority::Medium);
        assert!(config.db_path.ends_with("tasks.db"));
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let config: Config = serde_yaml::from_str("default_priority: High\n").unwrap();
        assert_eq!(config.default_priority, Priority::High);
        assert!(config.db_path.ends_with("tasks.db"));
    }
}
