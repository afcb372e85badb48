//! Configuration module
//!
//! Handles loading and managing configuration. Values are layered:
//! defaults, then a config file, then `PARALLEL_MANAGER_*` environment
//! variables, then command-line flags.

mod env;
mod file;

pub use env::{print_env_help, EnvConfig};
pub use file::{find_config_file, CONFIG_LOCATIONS};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::is_yaml;
use crate::utils::logger::LogLevel;

/// Application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP timeout in seconds, applied per request by the client
    pub timeout_secs: u64,

    /// Worker threads for a reactor started by a blocking run
    pub worker_threads: usize,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Output format (table, json, json-pretty, summary)
    pub format: String,

    /// User-Agent sent with every request
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            worker_threads: 1,
            log_level: "info".to_string(),
            format: "table".to_string(),
            user_agent: format!("parallel-manager/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read config file")?;

        let config: Self = if is_yaml(path.as_ref()) {
            serde_yaml::from_str(&content).context("Failed to parse YAML config")?
        } else {
            serde_json::from_str(&content).context("Failed to parse JSON config")?
        };

        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, the first standard location found, or defaults
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match find_config_file() {
                Some(found) => Self::load(found),
                None => Ok(Self::default()),
            },
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = if is_yaml(path.as_ref()) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Reject values that cannot work
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than 0");
        }
        if self.worker_threads == 0 {
            bail!("worker_threads must be greater than 0");
        }
        if LogLevel::from_str(&self.log_level).is_none() {
            bail!("Unknown log level: {}", self.log_level);
        }
        Ok(())
    }

    /// Overlay values set in the environment
    pub fn apply_env(mut self, env: &EnvConfig) -> Self {
        if let Some(timeout) = env.timeout {
            self.timeout_secs = timeout;
        }
        if let Some(workers) = env.workers {
            self.worker_threads = workers;
        }
        if let Some(level) = &env.log_level {
            self.log_level = level.clone();
        }
        if let Some(format) = &env.format {
            self.format = format.clone();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.worker_threads, 1);
        assert!(config.user_agent.starts_with("parallel-manager/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_load_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let config = AppConfig {
            timeout_secs: 5,
            worker_threads: 2,
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"timeout_secs": 12}"#).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.timeout_secs, 12);
        assert_eq!(loaded.worker_threads, 1);
        assert_eq!(loaded.format, "table");
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let config = AppConfig {
            worker_threads: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_level() {
        let config = AppConfig {
            log_level: "loud".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_env() {
        let env = EnvConfig {
            timeout: Some(3),
            format: Some("json".to_string()),
            ..Default::default()
        };

        let config = AppConfig::default().apply_env(&env);
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.format, "json");
        assert_eq!(config.worker_threads, 1);
    }
}
