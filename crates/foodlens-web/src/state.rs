//! Shared application state for the web server.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::{DateTime, Utc};
use foodlens_config::WebConfig;
use foodlens_ranker::RiskEngine;
use minijinja::{Environment, Value};
use tracing::error;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub engine: RiskEngine,
    pub web: WebConfig,
    pub started_at: DateTime<Utc>,
    templates: Environment<'static>,
}

impl AppState {
    pub fn new(engine: RiskEngine, web: WebConfig) -> Result<Self, minijinja::Error> {
        let mut templates = Environment::new();
        templates.add_template("layout.html", include_str!("../templates/layout.html"))?;
        templates.add_template("dashboard.html", include_str!("../templates/dashboard.html"))?;

        Ok(Self { engine, web, started_at: Utc::now(), templates })
    }

    /// Render a page with the given status. Template failures become a bare 500.
    pub fn render(&self, status: StatusCode, name: &str, ctx: Value) -> Response {
        let rendered = self
            .templates
            .get_template(name)
            .and_then(|template| template.render(ctx));

        match rendered {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                error!(template = name, error = %e, "Template rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
            }
        }
    }
}

pub type SharedState = Arc<AppState>;
