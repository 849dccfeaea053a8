//! HTTP API for the fit bridge.
//!
//! ## Endpoints
//!
//! - `POST /api/v1/fit-score` - Score a resume against a job, waiting for the agents
//! - `GET /api/health` - Health check

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::BridgeError;
use crate::gateway::HttpGateway;
use crate::scoring::{ConsolidatedResult, ScoreService};

use types::{HealthResponse, ScoreRequest};

/// Shared application state.
pub struct AppState {
    pub scoring: ScoreService,
}

/// Build the router around an already wired scoring service.
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/v1/fit-score", post(fit_score))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let gateway = HttpGateway::new(&config.gateway_url, config.request_timeout)?;
    let state = Arc::new(AppState {
        scoring: ScoreService::from_config(Arc::new(gateway), &config),
    });

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        gateway = %config.gateway_url,
        agent = %config.agent_name,
        "Server listening on http://{}",
        addr
    );

    axum::serve(listener, routes(state)).await?;
    Ok(())
}

/// GET /api/health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /api/v1/fit-score
///
/// Holds the connection open until the agents answer. If the client goes
/// away, axum drops this future along with the in-flight gateway call.
async fn fit_score(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ConsolidatedResult>, BridgeError> {
    tracing::info!(
        company = %request.company_name,
        resume_chars = request.resume.len(),
        "Received fit-score request"
    );
    let result = state.scoring.score(&request).await?;
    Ok(Json(result))
}
