//! Scoring and evidence-store settings.
//!
//! The historical thresholds (0.4 vs 0.5, top-5 vs unlimited) are only
//! defaults here; every value can be overridden from `foodlens.toml`.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::{FoodLensError, Result};

// ── Scoring ───────────────────────────────────────────────────────────────────

/// Tunables for the risk scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Per-association cutoff. Scores must be strictly greater to survive.
    #[serde(default = "default_significance_threshold")]
    pub significance_threshold: f64,

    /// Keep at most this many diseases. `None` keeps everything.
    #[serde(default)]
    pub max_results: Option<usize>,

    /// Dose at which an edge weight applies unscaled.
    #[serde(default = "default_dose_reference_grams")]
    pub dose_reference_grams: f64,
}

fn default_significance_threshold() -> f64 { 0.4 }
fn default_dose_reference_grams() -> f64 { 100.0 }

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            significance_threshold: default_significance_threshold(),
            max_results: None,
            dose_reference_grams: default_dose_reference_grams(),
        }
    }
}

impl ScoringConfig {
    /// The top-5 cutoff used by the legacy dashboard.
    pub fn legacy() -> Self {
        Self { max_results: Some(5), ..Self::default() }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.significance_threshold = threshold;
        self
    }

    pub fn with_max_results(mut self, max_results: Option<usize>) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.significance_threshold.is_finite() {
            return Err(FoodLensError::Config(format!(
                "significance_threshold must be finite, got {}",
                self.significance_threshold
            )));
        }
        if !self.dose_reference_grams.is_finite() || self.dose_reference_grams <= 0.0 {
            return Err(FoodLensError::Config(format!(
                "dose_reference_grams must be a positive number, got {}",
                self.dose_reference_grams
            )));
        }
        if self.max_results == Some(0) {
            return Err(FoodLensError::Config(
                "max_results must be at least 1 (omit it for unlimited)".to_string(),
            ));
        }
        Ok(())
    }
}

// ── Evidence store ────────────────────────────────────────────────────────────

/// Connection settings for the external graph store.
///
/// The password is never part of the file: `password_env` names the
/// environment variable that holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_uri")]
    pub uri: String,

    #[serde(default = "default_store_user")]
    pub user: String,

    /// Target database name inside the server.
    #[serde(default = "default_store_database")]
    pub database: String,

    #[serde(default = "default_password_env")]
    pub password_env: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    /// Caller-side timeout around each retrieval, in seconds.
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
}

fn default_store_uri() -> String { "neo4j://127.0.0.1:7687".to_string() }
fn default_store_user() -> String { "neo4j".to_string() }
fn default_store_database() -> String { "neo4j".to_string() }
fn default_password_env() -> String { "FOODLENS_STORE_PASSWORD".to_string() }
fn default_max_connections() -> usize { 8 }
fn default_query_timeout_secs() -> u64 { 10 }

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: default_store_uri(),
            user: default_store_user(),
            database: default_store_database(),
            password_env: default_password_env(),
            max_connections: default_max_connections(),
            query_timeout_secs: default_query_timeout_secs(),
        }
    }
}

impl StoreConfig {
    /// Read the store password from the configured environment variable.
    pub fn password(&self) -> Result<SecretString> {
        std::env::var(&self.password_env)
            .map(SecretString::from)
            .map_err(|_| {
                FoodLensError::Config(format!(
                    "store password not set (export {})",
                    self.password_env
                ))
            })
    }

    pub fn query_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.query_timeout_secs)
    }
}
