//! Ingredient library.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct IngredientLibrary {
    pub count: usize,
    pub ingredients: Vec<String>,
}

/// GET /api/ingredients - distinct ingredient names known to the store
pub async fn api_ingredients(State(state): State<SharedState>) -> Result<Json<IngredientLibrary>, ApiError> {
    let ingredients = state.engine.store().list_ingredients().await?;
    Ok(Json(IngredientLibrary { count: ingredients.len(), ingredients }))
}
