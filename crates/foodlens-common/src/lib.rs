//! foodlens-common — Shared types, errors, and settings used across all FoodLens crates.

pub mod error;
pub mod entities;
pub mod risk_config;

// Re-export commonly used types
pub use entities::{DiseaseRiskSummary, Edge, IngredientInput, ScoredAssociation};
pub use error::{FoodLensError, Result};
pub use risk_config::{ScoringConfig, StoreConfig};
