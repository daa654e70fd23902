//! Configuration management for Tributary.
//!
//! Configuration is read from `~/.config/tributary/config.toml`. A missing
//! file means defaults. Environment variables are applied on top:
//!
//! - `TRIBUTARY_NITTER_INSTANCE` - base URL of the shared Nitter instance
//! - `TRIBUTARY_NITTER_BASIC_AUTH` - Basic-Auth credential for that instance

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::adapters::parallel::DEFAULT_WORKERS;

pub const ENV_NITTER_INSTANCE: &str = "TRIBUTARY_NITTER_INSTANCE";
pub const ENV_NITTER_BASIC_AUTH: &str = "TRIBUTARY_NITTER_BASIC_AUTH";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub nitter: NitterConfig,
    pub http: HttpConfig,
    pub ingest: IngestConfig,
}

/// Shared Nitter instance used for `@username` and search sources.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NitterConfig {
    pub instance: String,
    pub basic_auth: String,
}

impl Default for NitterConfig {
    fn default() -> Self {
        Self {
            instance: "https://nitter.net".to_string(),
            basic_auth: String::new(),
        }
    }
}

impl NitterConfig {
    /// Instance base URL without a trailing slash.
    pub fn instance_url(&self) -> &str {
        self.instance.trim_end_matches('/')
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: concat!("tributary/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Sources ingested concurrently.
    pub workers: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }
}

impl Config {
    /// Load configuration from the default path, then apply environment
    /// overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        let mut config = if config_path.exists() {
            Self::read(&config_path)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from an explicit file, then apply environment
    /// overrides. Unlike [`Config::load`], the file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::read(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Get the default config file path: `~/.config/tributary/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("tributary").join("config.toml"))
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Applies overrides from `lookup` (the process environment outside of
    /// tests). Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(instance) = lookup(ENV_NITTER_INSTANCE).filter(|v| !v.is_empty()) {
            self.nitter.instance = instance;
        }
        if let Some(credential) = lookup(ENV_NITTER_BASIC_AUTH).filter(|v| !v.is_empty()) {
            self.nitter.basic_auth = credential;
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
