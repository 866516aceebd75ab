//
//  tonicpow
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Configuration for the TonicPow client and the `tpow` command-line tool.
//!
//! ## Overview
//!
//! - [`Environment`]: which API deployment requests go to
//! - [`ClientOptions`]: the builder consumed by [`TonicPowClient`](crate::api::TonicPowClient)
//! - [`Config`]: the persisted TOML file used by the command-line tool
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/tonicpow/config.toml`
//! - **macOS**: `~/Library/Application Support/com.tonicpow.tonicpow/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\tonicpow\tonicpow\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [client]
//! api_key = "your-api-key"
//! environment = "staging"
//! timeout_secs = 10
//! retry_count = 2
//! session_auth = false
//! ```
//!
//! ## Precedence
//!
//! Command-line flags override `TONICPOW_API_KEY` / `TONICPOW_ENVIRONMENT`,
//! which override the file, which overrides the built-in defaults.

mod environment;
mod file;
mod options;

pub use environment::*;
pub use file::*;
pub use options::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`ClientConfig::api_key`].
pub const ENV_API_KEY: &str = "TONICPOW_API_KEY";

/// Environment variable overriding [`ClientConfig::environment`].
pub const ENV_ENVIRONMENT: &str = "TONICPOW_ENVIRONMENT";

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "api_key",
    "environment",
    "timeout_secs",
    "retry_count",
    "user_agent",
    "session_auth",
];

/// Persisted configuration for the command-line tool.
///
/// # Examples
///
/// ```rust
/// use tonicpow::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.client.environment, "live");
/// assert_eq!(config.client.timeout_secs, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Settings used to build the API client.
    #[serde(default)]
    pub client: ClientConfig,
}

/// The `[client]` table of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API key sent in the `api_key` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment name or alias (`live`, `staging`, `development`, ...).
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries for transient failures.
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Overrides the default user agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Authenticate with a session cookie instead of the API key header.
    #[serde(default)]
    pub session_auth: bool,
}

fn default_environment() -> String {
    "live".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_retry_count() -> u32 {
    2
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            environment: default_environment(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            user_agent: None,
            session_auth: false,
        }
    }
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// A missing file is not an error; defaults are returned.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use tonicpow::config::Config;
    ///
    /// let config = Config::load()?;
    /// println!("Environment: {}", config.client.environment);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if config_exists(path) {
            let content = read_config_file(path)?;
            toml::from_str(&content)
                .with_context(|| format!("invalid configuration in {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Returns the path of `config.toml` in the platform config directory.
    ///
    /// The file may not exist yet.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "tonicpow", "tonicpow")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Applies `TONICPOW_API_KEY` and `TONICPOW_ENVIRONMENT` from the process
    /// environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from an arbitrary lookup.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_API_KEY) {
            self.client.api_key = Some(key);
        }
        if let Some(environment) = non_empty(ENV_ENVIRONMENT) {
            self.client.environment = environment;
        }
    }

    /// Gets a value by key.
    ///
    /// Returns `None` for unknown keys and unset optional values.
    ///
    /// ```rust
    /// use tonicpow::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.get("retry_count"), Some("2".to_string()));
    /// assert_eq!(config.get("api_key"), None);
    /// assert_eq!(config.get("unknown_key"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<String> {
        let client = &self.client;
        match key {
            "api_key" => client.api_key.clone(),
            "environment" => Some(client.environment.clone()),
            "timeout_secs" => Some(client.timeout_secs.to_string()),
            "retry_count" => Some(client.retry_count.to_string()),
            "user_agent" => client.user_agent.clone(),
            "session_auth" => Some(client.session_auth.to_string()),
            _ => None,
        }
    }

    /// Sets a value by key.
    ///
    /// Changes are only persisted by [`Config::save`].
    ///
    /// # Errors
    ///
    /// Fails for unknown keys and values that do not parse as the key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let client = &mut self.client;
        match key {
            "api_key" => client.api_key = Some(value.to_string()),
            "environment" => client.environment = value.to_string(),
            "timeout_secs" => {
                client.timeout_secs = value
                    .parse()
                    .with_context(|| format!("timeout_secs must be a whole number: {value}"))?
            }
            "retry_count" => {
                client.retry_count = value
                    .parse()
                    .with_context(|| format!("retry_count must be a whole number: {value}"))?
            }
            "user_agent" => client.user_agent = Some(value.to_string()),
            "session_auth" => {
                client.session_auth = value
                    .parse()
                    .with_context(|| format!("session_auth must be true or false: {value}"))?
            }
            _ => bail!(
                "unknown configuration key '{key}' (expected one of: {})",
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Builds [`ClientOptions`] from this configuration.
    pub fn client_options(&self) -> ClientOptions {
        let client = &self.client;
        let mut options = ClientOptions::new()
            .with_environment_str(&client.environment)
            .with_timeout(Duration::from_secs(client.timeout_secs))
            .with_retry_count(client.retry_count);

        if let Some(key) = &client.api_key {
            options = options.with_api_key(key);
        }
        if let Some(agent) = &client.user_agent {
            options = options.with_user_agent(agent);
        }
        if client.session_auth {
            options = options.with_session_auth();
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.client.environment, "live");
        assert_eq!(config.client.retry_count, 2);
        assert!(config.client.api_key.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tonicpow").join("config.toml");

        let mut config = Config::default();
        config.set("api_key", "abc123").unwrap();
        config.set("environment", "beta").unwrap();
        config.set("timeout_secs", "30").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.client.api_key.as_deref(), Some("abc123"));
        assert_eq!(loaded.client.environment, "beta");
        assert_eq!(loaded.client.timeout_secs, 30);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[client]\nenvironment = \"local\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.client.environment, "local");
        assert_eq!(config.client.timeout_secs, 10);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[client\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("retry_count", "many").is_err());
        assert!(config.set("session_auth", "maybe").is_err());
        assert!(config.set("editor", "vim").is_err());
        assert_eq!(config.client.retry_count, 2);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = Config::default();
        config.client.api_key = Some("from-file".to_string());

        config.apply_overrides(|name| match name {
            ENV_API_KEY => Some("from-env".to_string()),
            ENV_ENVIRONMENT => Some("   ".to_string()),
            _ => None,
        });

        assert_eq!(config.client.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.client.environment, "live");
    }

    #[test]
    fn test_client_options() {
        let mut config = Config::default();
        config.set("api_key", "key").unwrap();
        config.set("environment", "staging").unwrap();
        config.set("retry_count", "0").unwrap();
        config.set("session_auth", "true").unwrap();

        let options = config.client_options();
        assert_eq!(options.api_key(), Some("key"));
        assert_eq!(options.environment(), &Environment::staging());
        assert_eq!(options.retry_count(), 0);
        assert!(options.session_auth());
    }
}
