//! JSON scoring endpoint.

use std::collections::BTreeMap;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use foodlens_common::{DiseaseRiskSummary, FoodLensError, IngredientInput};
use serde::Deserialize;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct RiskRequest {
    /// Ingredient name to grams. `null` is a missing quantity and is rejected.
    pub ingredients: BTreeMap<String, Option<f64>>,
    /// Per-request override of the significance threshold.
    #[serde(default)]
    pub threshold: Option<f64>,
    /// Per-request cap on the number of diseases returned.
    #[serde(default)]
    pub max_results: Option<usize>,
}

/// POST /api/risks - rank diseases for a set of ingredients
pub async fn api_risks(
    State(state): State<SharedState>,
    payload: Result<Json<RiskRequest>, JsonRejection>,
) -> Result<Json<Vec<DiseaseRiskSummary>>, ApiError> {
    let Json(request) = payload.map_err(|rejection| FoodLensError::invalid(rejection.body_text()))?;
    let request_id = Uuid::new_v4();

    async move {
        let engine = if request.threshold.is_some() || request.max_results.is_some() {
            let mut scoring = state.engine.config().clone();
            if let Some(threshold) = request.threshold {
                scoring.significance_threshold = threshold;
            }
            if request.max_results.is_some() {
                scoring.max_results = request.max_results;
            }
            state
                .engine
                .with_scoring(scoring)
                .map_err(|e| FoodLensError::invalid(e.to_string()))?
        } else {
            state.engine.clone()
        };

        let inputs: Vec<IngredientInput> = request
            .ingredients
            .into_iter()
            .map(|(name, grams)| IngredientInput { ingredient: name, grams })
            .collect();

        let ranked = engine.compute_risks(&inputs).await?;
        Ok::<_, ApiError>(Json(ranked))
    }
    .instrument(info_span!("api_risks", %request_id))
    .await
}
