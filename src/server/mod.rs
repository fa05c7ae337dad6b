//! HTTP surface: health check, plan endpoint, and the embedded frontend.

mod routes;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::{
    config::{PlannerConfig, ServerConfig},
    core::TripPlanner,
    error::PlannerError,
};

pub use routes::PlanRequest;

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    planner: PlannerSlot,
}

#[derive(Debug, Clone)]
enum PlannerSlot {
    Ready(Arc<TripPlanner>),
    /// Plan requests fail with this configuration message and make no calls.
    Unconfigured(String),
}

impl AppState {
    pub fn new(planner: TripPlanner) -> Self {
        Self {
            planner: PlannerSlot::Ready(Arc::new(planner)),
        }
    }

    /// State for a server that should answer every plan request with a
    /// configuration error.
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            planner: PlannerSlot::Unconfigured(reason.into()),
        }
    }

    /// Build the planner from configuration. A missing credential does not
    /// stop the server; health and the frontend keep working.
    pub fn from_config(config: &PlannerConfig) -> Self {
        match TripPlanner::from_config(config) {
            Ok(planner) => Self::new(planner),
            Err(err) => {
                warn!(error = %err, "planner unavailable; /api/plan will report it");
                let reason = match err {
                    PlannerError::Config(message) => message,
                    other => other.to_string(),
                };
                Self::unconfigured(reason)
            }
        }
    }

    pub(crate) fn planner(&self) -> Result<&TripPlanner, PlannerError> {
        match &self.planner {
            PlannerSlot::Ready(planner) => Ok(planner),
            PlannerSlot::Unconfigured(reason) => Err(PlannerError::Config(reason.clone())),
        }
    }
}

impl IntoResponse for PlannerError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_error_payload())).into_response()
    }
}

/// Router with all routes, permissive CORS and request tracing.
pub fn router(state: AppState) -> Router {
    routes::api_routes()
        .fallback(routes::frontend)
        .with_state(Arc::new(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until Ctrl-C.
pub async fn serve(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("shutting down");
        })
        .await?;
    Ok(())
}
