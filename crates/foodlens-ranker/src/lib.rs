//! foodlens-ranker — Ingredient → disease risk scoring engine.
//!
//! Pipeline per request: normalise inputs, fetch evidence edges once,
//! dosage-scale each edge, drop insignificant associations, aggregate per
//! disease, rank and truncate.

pub mod normalise;
pub mod scorer;
pub mod engine;

pub use engine::RiskEngine;
pub use scorer::score_and_rank;
