//! Integration tests for the HTTP API endpoints.
//!
//! Uses axum's oneshot pattern (via tower::ServiceExt) — no TCP binding needed.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use fundsim::env_config::ServerConfig;
use fundsim::server::create_router;
use fundsim::simulation::ExpectationMethod;

fn app() -> axum::Router {
    create_router(Arc::new(ServerConfig::default()))
}

/// Parse response body as JSON.
async fn body_json(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    (status, body_json(resp.into_body()).await)
}

// ── GET /health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_200() {
    let (status, json) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "OK");
}

// ── GET / ────────────────────────────────────────────────────────────

#[tokio::test]
async fn index_serves_page() {
    let resp = app()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"), "{content_type}");
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("<h1>Fund Allocation Payout Simulation</h1>"));
}

// ── GET /slider ──────────────────────────────────────────────────────

#[tokio::test]
async fn slider_config() {
    let (status, json) = get(app(), "/slider").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["min"], 0);
    assert_eq!(json["max"], 100);
    assert_eq!(json["step"], 5);
    assert_eq!(json["value"], 50);
    let marks = json["marks"].as_object().unwrap();
    assert_eq!(marks.len(), 11);
    assert_eq!(marks["100"], "100");
}

// ── GET /figure ──────────────────────────────────────────────────────

#[tokio::test]
async fn figure_default_allocation() {
    let (status, json) = get(app(), "/figure?seed=7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["allocation"], 50);
    assert_eq!(json["seed"], 7);
    assert_eq!(json["fund_a_label"], "Amount invested in Fund A: €50");
    assert_eq!(json["fund_b_label"], "Amount invested in Fund B: €50");
    let ev = json["expected_return"].as_f64().unwrap();
    assert!((ev - 112.5).abs() < 0.5, "EV={ev}");
}

#[tokio::test]
async fn figure_layout_is_plotly_ready() {
    let (status, json) = get(app(), "/figure?allocation=20&seed=11").await;
    assert_eq!(status, StatusCode::OK);
    let fig = &json["figure"];
    assert_eq!(fig["data"].as_array().unwrap().len(), 2);
    assert_eq!(fig["data"][0]["x"].as_array().unwrap().len(), 1000);
    assert_eq!(fig["data"][0]["fill"], "tozeroy");
    assert_eq!(fig["layout"]["xaxis"]["range"], serde_json::json!([50.0, 180.0]));
    assert_eq!(
        fig["layout"]["title"]["text"],
        "Fund Allocation: 20% in Fund A and 80% in Fund B"
    );
    assert_eq!(fig["layout"]["annotations"][1]["text"], "Investment capital");
}

#[tokio::test]
async fn figure_same_seed_same_body() {
    let (_, a) = get(app(), "/figure?allocation=65&seed=123").await;
    let (_, b) = get(app(), "/figure?allocation=65&seed=123").await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn figure_closed_form_expectation() {
    let (status, json) = get(app(), "/figure?allocation=50&expectation=closed_form").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["expected_return"], 112.5);
    assert_eq!(json["expectation"], "closed_form");
}

#[tokio::test]
async fn figure_uses_configured_defaults() {
    let mut config = ServerConfig::default();
    config.render.seed = Some(99);
    config.render.expectation = ExpectationMethod::ClosedForm;
    let app = create_router(Arc::new(config));
    let (status, json) = get(app, "/figure?allocation=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["seed"], 99);
    assert_eq!(json["expected_return"], 120.0);
}

#[tokio::test]
async fn figure_full_fund_a_reports_degenerate_sample() {
    let (status, json) = get(app(), "/figure?allocation=100").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["kind"], "degenerate_sample");
    assert!(json["error"].as_str().unwrap().contains("105"));
}

#[tokio::test]
async fn figure_allocation_out_of_range() {
    let (status, json) = get(app(), "/figure?allocation=101").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "invalid_allocation");

    let (status, _) = get(app(), "/figure?allocation=-5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn figure_malformed_query() {
    let (status, json) = get(app(), "/figure?allocation=half").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["kind"], "invalid_query");

    let (status, _) = get(app(), "/figure?expectation=median").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
