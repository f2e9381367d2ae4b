//! Client configuration.
//!
//! Settings live in a small TOML file:
//!
//! ```toml
//! server = "http://localhost:8000"
//! timeout = 30
//! stream-timeout = 300
//! user-agent = "my-app/1.0"
//! ```
//!
//! The file is looked up in `$HIVE_AGENT_CONFIG_DIR`, falling back to the
//! platform config directory (`~/.config/hive-agent` on Linux). A missing
//! file yields the defaults. `HIVE_AGENT_URL` overrides `server`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Application directory name under the platform config dir.
const APP_NAME: &str = "hive-agent";

/// Default config filename.
const CLIENT_CONFIG_FILE: &str = "client.toml";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "HIVE_AGENT_CONFIG_DIR";

/// Environment variable overriding the server URL.
pub const SERVER_URL_ENV: &str = "HIVE_AGENT_URL";

/// Server used when nothing is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Connection settings for a Hive Agent server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClientConfig {
    /// Base URL of the agent API.
    pub server: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Streaming timeout in seconds.
    pub stream_timeout: u64,
    /// Custom user agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER_URL.to_string(),
            timeout: 30,
            stream_timeout: 300,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Streaming timeout as a `Duration`.
    pub fn stream_timeout(&self) -> Duration {
        Duration::from_secs(self.stream_timeout)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using a custom variable lookup.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(server) = lookup(SERVER_URL_ENV).filter(|s| !s.is_empty()) {
            self.server = server;
        }
        self
    }
}

/// Config directory (`$HIVE_AGENT_CONFIG_DIR` or the platform default).
pub fn config_dir() -> Option<PathBuf> {
    match std::env::var(CONFIG_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::config_dir().map(|d| d.join(APP_NAME)),
    }
}

/// Path to the client config file.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join(CLIENT_CONFIG_FILE))
}

/// Load the client configuration, applying environment overrides.
pub fn load_config() -> Result<ClientConfig> {
    Ok(load_config_from(config_path().as_deref())?.with_env_overrides())
}

/// Load client config from a specific path.
///
/// Returns the defaults if the path is `None` or the file doesn't exist.
pub fn load_config_from(path: Option<&Path>) -> Result<ClientConfig> {
    let Some(path) = path else {
        return Ok(ClientConfig::default());
    };

    if !path.exists() {
        return Ok(ClientConfig::default());
    }

    let contents = std::fs::read_to_string(path).inspect_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to read config file")
    })?;
    tracing::debug!(path = %path.display(), "Loaded client config");
    ClientConfig::from_toml(&contents)
}
