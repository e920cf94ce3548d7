//! Global configuration for fleet (stored in ~/.config/fleet/config.toml)
//!
//! Environment variables take precedence over the file:
//! - `FLEET_CONFIG_DIR`: directory holding `config.toml`
//! - `FLEET_API_URL`: API root URL
//! - `FLEET_API_TOKEN`: session or API token
//! - `FLEET_TIMEOUT`: request timeout in seconds

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::bail_invalid;
use crate::error::{FleetError, Result};

const CONFIG_DIR: &str = "fleet";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "FLEET_CONFIG_DIR";
const API_URL_ENV_VAR: &str = "FLEET_API_URL";
const API_TOKEN_ENV_VAR: &str = "FLEET_API_TOKEN";
const TIMEOUT_ENV_VAR: &str = "FLEET_TIMEOUT";

pub const DEFAULT_API_URL: &str = "https://api.balena-cloud.com";
pub const DEFAULT_API_VERSION: &str = "v6";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    pub api_url: String,
    pub api_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            token: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl FleetConfig {
    fn config_path() -> Result<PathBuf> {
        let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            PathBuf::from(env_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| {
                    FleetError::Other("unable to determine config directory".to_string())
                })?
                .join(CONFIG_DIR)
        };

        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Load the config file (defaults when absent) and apply environment
    /// overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                FleetError::Other(format!(
                    "failed to read config from {}: {}",
                    path.display(),
                    e
                ))
            })?;
            Self::parse(&content)?
        } else {
            Self::default()
        };

        config.apply_env()?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.timeout_seconds = config.timeout_seconds.clamp(5, 300);
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var(API_URL_ENV_VAR) {
            if !url.is_empty() {
                self.api_url = url;
            }
        }

        if let Ok(token) = std::env::var(API_TOKEN_ENV_VAR) {
            if !token.is_empty() {
                self.token = Some(token);
            }
        }

        if let Ok(timeout) = std::env::var(TIMEOUT_ENV_VAR) {
            match timeout.parse::<u64>() {
                Ok(seconds) => self.timeout_seconds = seconds.clamp(5, 300),
                Err(_) => bail_invalid!(TIMEOUT_ENV_VAR, timeout),
            }
        }

        Ok(())
    }

    /// The configured token, or `NotLoggedIn` when there is none.
    pub fn require_token(&self) -> Result<&str> {
        match self.token.as_deref() {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(FleetError::NotLoggedIn {
                config_path: Self::source_display(),
            }),
        }
    }

    /// Returns the config file location for display purposes
    pub fn source_display() -> String {
        match Self::config_path() {
            Ok(path) => path.display().to_string(),
            Err(_) => format!("~/.config/{}/{}", CONFIG_DIR, CONFIG_FILE),
        }
    }
}
