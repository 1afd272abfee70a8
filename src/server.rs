//! Axum HTTP server: the page, its slider config and the figure endpoint.
//!
//! Handlers are stateless apart from the immutable `ServerConfig` shared as
//! `Arc<ServerConfig>`. Every `/figure` request recomputes from scratch on
//! the blocking pool; a failed render becomes a JSON error the page shows in
//! place of the chart, and the next slider move simply tries again.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Interactive page |
//! | GET | `/health` | Health check |
//! | GET | `/slider` | Slider domain, step, default and marks |
//! | GET | `/figure` | Chart + fund labels for `?allocation=A[&seed=S][&expectation=M]` |

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::constants::{
    ALLOCATION_DEFAULT, ALLOCATION_MARK_STEP, ALLOCATION_MAX, ALLOCATION_MIN, ALLOCATION_STEP,
};
use crate::dashboard::{render, DashboardUpdate, RenderOptions};
use crate::env_config::ServerConfig;
use crate::error::FundsimError;
use crate::simulation::ExpectationMethod;
use crate::types::Allocation;

const INDEX_HTML: &str = include_str!("../static/index.html");

pub type AppState = Arc<ServerConfig>;

pub fn create_router(config: Arc<ServerConfig>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health_check))
        .route("/slider", get(handle_slider))
        .route("/figure", get(handle_figure))
        .layer(cors)
        .with_state(config)
}

// ── Request/Response types ──────────────────────────────────────────

#[derive(Deserialize)]
struct FigureQuery {
    #[serde(default = "default_allocation")]
    allocation: i64,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    expectation: Option<ExpectationMethod>,
}

fn default_allocation() -> i64 {
    ALLOCATION_DEFAULT as i64
}

#[derive(Serialize)]
struct SliderConfig {
    min: u8,
    max: u8,
    step: u8,
    value: u8,
    marks: BTreeMap<u8, String>,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn error_response(status: StatusCode, kind: &str, msg: &str) -> ApiError {
    (status, Json(serde_json::json!({ "error": msg, "kind": kind })))
}

fn status_for(err: &FundsimError) -> StatusCode {
    match err {
        FundsimError::InvalidAllocation { .. } | FundsimError::InvalidParameter { .. } => {
            StatusCode::BAD_REQUEST
        }
        FundsimError::DegenerateSample { .. } | FundsimError::InsufficientData { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        FundsimError::EmptyData { .. } | FundsimError::InvalidChart { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<FundsimError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: FundsimError) -> Self {
        error_response(status_for(&err), err.kind(), &err.to_string())
    }
}

// ── Handlers ────────────────────────────────────────────────────────

async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn handle_health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

async fn handle_slider() -> impl IntoResponse {
    let marks = (ALLOCATION_MIN..=ALLOCATION_MAX)
        .step_by(ALLOCATION_MARK_STEP as usize)
        .map(|v| (v, v.to_string()))
        .collect();
    Json(SliderConfig {
        min: ALLOCATION_MIN,
        max: ALLOCATION_MAX,
        step: ALLOCATION_STEP,
        value: ALLOCATION_DEFAULT,
        marks,
    })
}

async fn handle_figure(
    State(config): State<AppState>,
    query: Result<Query<FigureQuery>, QueryRejection>,
) -> Result<Json<DashboardUpdate>, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        error_response(
            StatusCode::BAD_REQUEST,
            "invalid_query",
            &rejection.body_text(),
        )
    })?;

    let allocation = Allocation::new(params.allocation).inspect_err(|e| {
        tracing::warn!(allocation = params.allocation, error = %e, "rejected allocation");
    })?;

    let options = RenderOptions {
        seed: params.seed.or(config.render.seed),
        expectation: params.expectation.unwrap_or(config.render.expectation),
        ..config.render.clone()
    };

    let result = tokio::task::spawn_blocking(move || render(allocation, &options))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "render task failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                "render task failed",
            )
        })?;

    match result {
        Ok(update) => Ok(Json(update)),
        Err(e) => {
            tracing::warn!(allocation = allocation.fund_a(), error = %e, "render failed");
            Err(e.into())
        }
    }
}
