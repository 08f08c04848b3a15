//! Command implementations for the FoodLens CLI
//!
//! `score` ranks diseases for a list of `name=grams` pairs; `ingredients`
//! prints the ingredient library known to the evidence store.

pub mod ingredients;
pub mod score;
