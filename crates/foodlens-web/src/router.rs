//! Axum router — maps all URL paths to handlers.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    dashboard::{analyze, dashboard},
    ingredients::api_ingredients,
    risks::api_risks,
    system::api_health,
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",        get(dashboard))
        .route("/analyze", post(analyze))

        // API endpoints
        .route("/api/risks",       post(api_risks))
        .route("/api/ingredients", get(api_ingredients))
        .route("/api/health",      get(api_health))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
