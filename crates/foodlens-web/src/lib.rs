//! foodlens-web — dashboard and JSON API for FoodLens
//! Provides:
//!   - Ingredient form with a ranked disease risk table
//!   - `POST /api/risks` scoring endpoint
//!   - Ingredient library listing
//!   - Evidence store health check

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
