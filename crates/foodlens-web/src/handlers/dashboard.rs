//! Dashboard: ingredient form, ranked risk table and ingredient library.

use axum::{extract::State, http::StatusCode, response::Response, Form};
use foodlens_common::{DiseaseRiskSummary, FoodLensError, IngredientInput, Result};
use minijinja::context;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::status_for;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub ingredients: String,
}

/// One row of the rendered risk table.
#[derive(Debug, Serialize)]
pub struct RiskRow {
    pub rank: usize,
    pub disease: String,
    pub score: String,
    /// Bar width relative to the top-ranked disease, 0-100.
    pub bar: u32,
    pub contributors: String,
}

#[derive(Debug, Serialize)]
struct Notice {
    level: &'static str,
    title: &'static str,
    message: String,
}

pub async fn dashboard(State(state): State<SharedState>) -> Response {
    let (library, library_error) = load_library(&state).await;
    state.render(
        StatusCode::OK,
        "dashboard.html",
        context! {
            form_text => "",
            default_grams => state.web.default_grams,
            library => library,
            library_error => library_error,
            threshold => state.engine.config().significance_threshold,
            started_at => state.started_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        },
    )
}

pub async fn analyze(State(state): State<SharedState>, Form(form): Form<AnalyzeForm>) -> Response {
    let default_grams = (!state.web.require_grams).then_some(state.web.default_grams);

    let outcome = match parse_ingredient_lines(&form.ingredients, default_grams) {
        Ok(inputs) => state.engine.compute_risks(&inputs).await,
        Err(e) => Err(e),
    };

    let (status, rows, notice) = match outcome {
        Ok(ranked) if ranked.is_empty() => (
            StatusCode::OK,
            Vec::new(),
            Some(Notice {
                level: "ok",
                title: "No significant risk",
                message: "None of these ingredients has an association above the significance threshold.".into(),
            }),
        ),
        Ok(ranked) => (StatusCode::OK, risk_rows(&ranked), None),
        Err(e) if e.is_store_failure() => {
            warn!(kind = e.kind(), error = %e, "Dashboard analysis degraded");
            (
                status_for(&e),
                Vec::new(),
                Some(Notice {
                    level: "degraded",
                    title: "Evidence store unavailable",
                    message: format!("Risks could not be computed right now ({}). This is not a clean result.", e.kind()),
                }),
            )
        }
        Err(e) => (
            status_for(&e),
            Vec::new(),
            Some(Notice { level: "rejected", title: "Request rejected", message: e.to_string() }),
        ),
    };

    let (library, library_error) = load_library(&state).await;
    state.render(
        status,
        "dashboard.html",
        context! {
            form_text => form.ingredients,
            default_grams => state.web.default_grams,
            rows => rows,
            notice => notice,
            library => library,
            library_error => library_error,
            threshold => state.engine.config().significance_threshold,
            started_at => state.started_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        },
    )
}

async fn load_library(state: &SharedState) -> (Vec<String>, Option<String>) {
    match state.engine.store().list_ingredients().await {
        Ok(names) => (names, None),
        Err(e) => {
            warn!(error = %e, "Could not load ingredient library");
            (Vec::new(), Some(e.kind().to_string()))
        }
    }
}

/// Parse the form's textarea: one `name, grams` per line.
///
/// Blank lines are skipped. A bare name takes `default_grams`; when that is
/// `None` the quantity is left missing and the engine rejects the request.
pub fn parse_ingredient_lines(text: &str, default_grams: Option<f64>) -> Result<Vec<IngredientInput>> {
    let mut inputs = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let input = match line.rsplit_once(',') {
            Some((name, qty)) => {
                let qty = qty.trim();
                let digits = qty.strip_suffix('g').unwrap_or(qty).trim();
                let grams: f64 = digits.parse().map_err(|_| {
                    FoodLensError::invalid(format!(
                        "line {}: '{}' is not a quantity in grams",
                        lineno + 1,
                        qty
                    ))
                })?;
                IngredientInput::new(name.trim(), grams)
            }
            None => match default_grams {
                Some(grams) => IngredientInput::new(line, grams),
                None => IngredientInput::without_grams(line),
            },
        };
        inputs.push(input);
    }
    Ok(inputs)
}

fn risk_rows(ranked: &[DiseaseRiskSummary]) -> Vec<RiskRow> {
    let top = ranked.first().map(|r| r.score).unwrap_or(0.0);
    ranked
        .iter()
        .enumerate()
        .map(|(i, r)| RiskRow {
            rank: i + 1,
            disease: r.disease.clone(),
            score: format!("{:.3}", r.score),
            bar: if top > 0.0 { ((r.score / top) * 100.0).round().clamp(0.0, 100.0) as u32 } else { 0 },
            contributors: r.contributors.join(", "),
        })
        .collect()
}
