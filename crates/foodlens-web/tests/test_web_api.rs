//! Router-level tests over the in-memory evidence store.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use foodlens_common::{Edge, FoodLensError, Result, ScoringConfig};
use foodlens_config::WebConfig;
use foodlens_kg::{EvidenceStore, InMemoryEvidenceStore};
use foodlens_ranker::RiskEngine;
use foodlens_web::{router::build_router, state::AppState};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

struct DownStore;

#[async_trait]
impl EvidenceStore for DownStore {
    async fn fetch_edges(&self, _ids: &BTreeSet<String>) -> Result<Vec<Edge>> {
        Err(FoodLensError::Connection("connection refused".into()))
    }

    async fn list_ingredients(&self) -> Result<Vec<String>> {
        Err(FoodLensError::Connection("connection refused".into()))
    }

    async fn ping(&self) -> Result<()> {
        Err(FoodLensError::Connection("connection refused".into()))
    }
}

fn app_with(store: Arc<dyn EvidenceStore>) -> Router {
    let engine = RiskEngine::new(store, ScoringConfig::default()).unwrap();
    build_router(AppState::new(engine, WebConfig::default()).unwrap())
}

fn app() -> Router {
    app_with(Arc::new(InMemoryEvidenceStore::new().with_edges([
        ("sugar", "Type 2 diabetes", 0.8),
        ("sugar", "Obesity", 0.6),
        ("salt", "Hypertension", 0.7),
    ])))
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_form(app: Router, body: &'static str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_api_risks_ranks_diseases() {
    let (status, body) = post_json(app(), "/api/risks", json!({"ingredients": {"Sugar": 100, "salt": 100}})).await;
    assert_eq!(status, StatusCode::OK);

    let diseases: Vec<&str> = body.as_array().unwrap().iter().map(|r| r["disease"].as_str().unwrap()).collect();
    assert_eq!(diseases, vec!["Type 2 diabetes", "Hypertension", "Obesity"]);
    assert_eq!(body[0]["contributors"], json!(["sugar"]));
}

#[tokio::test]
async fn test_api_risks_per_request_overrides() {
    let (status, body) = post_json(
        app(),
        "/api/risks",
        json!({"ingredients": {"sugar": 100, "salt": 100}, "threshold": 0.65, "max_results": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["disease"], "Type 2 diabetes");

    let (status, body) = post_json(app(), "/api/risks", json!({"ingredients": {"sugar": 100}, "max_results": 0})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_argument");
}

#[tokio::test]
async fn test_api_risks_nothing_significant_is_empty_array() {
    let (status, body) = post_json(app(), "/api/risks", json!({"ingredients": {"kale": 300}})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_api_risks_rejects_bad_input() {
    let (status, body) = post_json(app(), "/api/risks", json!({"ingredients": {"sugar": 100, "salt": null}})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_argument");

    let (status, _) = post_json(app(), "/api/risks", json!({"ingredients": {}})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_json(app(), "/api/risks", json!({"foods": ["sugar"]})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_argument");
}

#[tokio::test]
async fn test_api_risks_store_down_is_503_not_empty() {
    let (status, body) = post_json(app_with(Arc::new(DownStore)), "/api/risks", json!({"ingredients": {"sugar": 100}})).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "connection_error");
}

#[tokio::test]
async fn test_ingredient_library_and_health() {
    let (status, body) = get_text(app(), "/api/ingredients").await;
    assert_eq!(status, StatusCode::OK);
    let library: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(library, json!({"count": 2, "ingredients": ["salt", "sugar"]}));

    let (status, body) = get_text(app(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"ok\""));

    let (status, body) = get_text(app_with(Arc::new(DownStore)), "/api/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("connection_error"));
}

#[tokio::test]
async fn test_dashboard_renders_form_and_library() {
    let (status, body) = get_text(app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<form method=\"post\" action=\"/analyze\">"));
    assert!(body.contains("<span class=\"tag\">sugar</span>"));
}

#[tokio::test]
async fn test_analyze_renders_ranked_table() {
    let (status, body) = post_form(app(), "ingredients=sugar%2C+100%0D%0Asalt%2C+100").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<td>Type 2 diabetes</td>"));
    assert!(body.contains("<code>0.800</code>"));
    assert!(!body.contains("No significant risk"));
}

#[tokio::test]
async fn test_analyze_states() {
    let (status, body) = post_form(app(), "ingredients=kale%2C+300").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No significant risk"));

    let (status, body) = post_form(app(), "ingredients=sugar%2C+plenty").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Request rejected"));

    let (status, body) = post_form(app_with(Arc::new(DownStore)), "ingredients=sugar%2C+100").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("Evidence store unavailable"));
    assert!(!body.contains("No significant risk"));
}

#[tokio::test]
async fn test_analyze_escapes_user_text() {
    let (_, body) = post_form(app(), "ingredients=%3Cb%3Ekale").await;
    assert!(body.contains("&lt;b&gt;kale"));
    assert!(!body.contains("<b>kale"));
}
