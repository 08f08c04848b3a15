//! Configuration loading for FoodLens.
//! Reads foodlens.toml from the current directory or the path in FOODLENS_CONFIG,
//! then applies environment overrides. Secrets never live in the file.

use std::path::{Path, PathBuf};

use foodlens_common::{ScoringConfig, StoreConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub const CONFIG_ENV: &str = "FOODLENS_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "foodlens.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Could not read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Could not parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Dose assumed by the dashboard form when a line has no quantity.
    #[serde(default = "default_grams")]
    pub default_grams: f64,
    /// Reject form lines without a quantity instead of assuming `default_grams`.
    #[serde(default)]
    pub require_grams: bool,
}

fn default_bind() -> String { "127.0.0.1:3000".to_string() }
fn default_grams() -> f64 { 100.0 }

impl Default for WebConfig {
    fn default() -> Self {
        Self { bind: default_bind(), default_grams: default_grams(), require_grams: false }
    }
}


impl Config {
    /// Load configuration.
    ///
    /// An explicit `FOODLENS_CONFIG` path must exist. A missing default
    /// `foodlens.toml` falls back to built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            Err(_) => {
                info!("No {DEFAULT_CONFIG_FILE} found, using built-in defaults");
                Self::default()
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        debug!(path = %path.display(), "Loaded config file");
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Environment wins over the file for deployment-specific values.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(uri) = lookup("FOODLENS_STORE_URI") {
            self.store.uri = uri;
        }
        if let Some(user) = lookup("FOODLENS_STORE_USER") {
            self.store.user = user;
        }
        if let Some(database) = lookup("FOODLENS_STORE_DATABASE") {
            self.store.database = database;
        }
        if let Some(bind) = lookup("FOODLENS_BIND") {
            self.web.bind = bind;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if !self.web.default_grams.is_finite() || self.web.default_grams < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "web.default_grams must be >= 0, got {}",
                self.web.default_grams
            )));
        }
        if self.store.max_connections == 0 {
            return Err(ConfigError::Invalid("store.max_connections must be at least 1".into()));
        }
        Ok(())
    }
}
