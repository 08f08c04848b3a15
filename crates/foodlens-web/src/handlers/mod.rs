//! HTTP handlers for all web routes.

pub mod dashboard;
pub mod ingredients;
pub mod risks;
pub mod system;
