//! Client configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::GroupId;
use crate::error::{GroupCalError, GroupCalResult};

static DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn is_default_api_url(url: &String) -> bool {
    url == DEFAULT_API_URL
}

fn is_default_timeout(secs: &u64) -> bool {
    *secs == DEFAULT_TIMEOUT_SECS
}

/// Configuration at ~/.config/groupcal/config.toml
///
/// Every key can be overridden from the environment with a `GROUPCAL_`
/// prefix, e.g. `GROUPCAL_TOKEN` or `GROUPCAL_DEFAULT_GROUP`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GroupCalConfig {
    /// Base URL of the scheduling backend
    #[serde(default = "default_api_url", skip_serializing_if = "is_default_api_url")]
    pub api_url: String,

    /// Bearer token sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Group used when a command is run without --group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_group: Option<GroupId>,

    #[serde(default = "default_timeout_secs", skip_serializing_if = "is_default_timeout")]
    pub timeout_secs: u64,
}

impl Default for GroupCalConfig {
    fn default() -> Self {
        GroupCalConfig {
            api_url: default_api_url(),
            token: None,
            default_group: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GroupCalConfig {
    pub fn config_path() -> GroupCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| GroupCalError::Config("Could not determine config directory".into()))?
            .join("groupcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default path plus `GROUPCAL_*` overrides, creating a
    /// commented template first if there is no config file yet.
    pub fn load() -> GroupCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::build(&config_path, true)
    }

    /// Load the file alone, ignoring the environment. Use this before
    /// `save_to` so overrides are not written back.
    pub fn load_from(path: &Path) -> GroupCalResult<Self> {
        Self::build(path, false)
    }

    fn build(path: &Path, with_env: bool) -> GroupCalResult<Self> {
        let mut builder =
            Config::builder().add_source(File::from(path.to_path_buf()).required(false));
        if with_env {
            builder = builder.add_source(Environment::with_prefix("GROUPCAL"));
        }

        builder
            .build()
            .map_err(|e| GroupCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| GroupCalError::Config(e.to_string()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Save the current config to `path`.
    pub fn save_to(&self, path: &Path) -> GroupCalResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| GroupCalError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| GroupCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a config file with all options commented out.
    pub fn create_default_config(path: &Path) -> GroupCalResult<()> {
        let contents = format!(
            "\
# groupcal configuration

# Where the scheduling API lives:
# api_url = \"{}\"

# Access token for the API (or set GROUPCAL_TOKEN):
# token = \"...\"

# Group to use when --group is not given:
# default_group = 1

# Seconds before a request is abandoned:
# timeout_secs = {}
",
            DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                GroupCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| GroupCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "groupcal-config-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join("config.toml")
    }

    #[test]
    fn commented_template_loads_defaults() {
        let path = temp_path("template");
        GroupCalConfig::create_default_config(&path).unwrap();

        let config = GroupCalConfig::load_from(&path).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.default_group.is_none());
    }

    #[test]
    fn saved_values_are_read_back() {
        let path = temp_path("save");
        let config = GroupCalConfig {
            api_url: "https://sched.example.com/api".into(),
            token: Some("secret".into()),
            default_group: Some(7),
            ..GroupCalConfig::default()
        };
        config.save_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("timeout_secs"));

        assert_eq!(GroupCalConfig::load_from(&path).unwrap().default_group, Some(7));
    }
}
