use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use super::AppState;
use crate::{config::SERVICE_NAME, error::PlannerError, types::PlanResponse};

const INDEX_HTML: &str = include_str!("../../static/index.html");

type AppStateArc = Arc<AppState>;

/// Body of `POST /api/plan`
#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequest {
    pub message: String,
}

pub(super) fn api_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/plan", post(plan))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": SERVICE_NAME }))
}

async fn plan(
    State(state): State<AppStateArc>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Json<PlanResponse>, PlannerError> {
    let Json(request) =
        payload.map_err(|rejection| PlannerError::InvalidRequest(rejection.body_text()))?;

    let planner = state.planner()?;
    info!(bytes = request.message.len(), "plan requested");

    planner.plan(&request.message).await.map(Json).map_err(|err| {
        error!(code = err.error_code(), error = %err, "plan request failed");
        err
    })
}

/// Everything outside the API gets the page; unknown API paths get a 404.
pub(super) async fn frontend(uri: Uri) -> Response {
    if uri.path().trim_start_matches('/').starts_with("api/") {
        return (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))).into_response();
    }
    Html(INDEX_HTML).into_response()
}
