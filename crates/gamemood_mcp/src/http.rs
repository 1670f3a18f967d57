//! JSON HTTP surface served by the `server` binary.

use std::sync::Arc;

use axum::debug_handler;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use gamemood_core::observability::Health;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::GameMoodMcpHandler;
use crate::error::McpError;
use crate::services::WellnessService;
use crate::types::{
    DashboardParams, DashboardResult, HistoryParams, RecommendGamesParams, RecommendGamesResult,
    StreakParams, StreakResult, TrendParams, TrendResult, WellnessMetricsResult,
};

pub const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

pub struct AppState {
    pub service: WellnessService,
    pub metrics: PrometheusHandle,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

#[debug_handler]
async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(Health::readiness(state.service.has_analyzer())),
    )
}

#[debug_handler]
async fn metrics_endpoint(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = state.metrics.render();
    ([("content-type", "text/plain; version=0.0.4")], body)
}

#[debug_handler]
async fn recommendations(
    State(state): State<Arc<AppState>>,
    Json(params): Json<RecommendGamesParams>,
) -> ApiResult<RecommendGamesResult> {
    state
        .service
        .recommend_games(params)
        .map(Json)
        .map_err(map_err)
}

#[debug_handler]
async fn wellness_metrics(
    State(state): State<Arc<AppState>>,
    Json(params): Json<HistoryParams>,
) -> Json<WellnessMetricsResult> {
    Json(state.service.wellness_metrics(params))
}

#[debug_handler]
async fn wellness_streak(
    State(state): State<Arc<AppState>>,
    Json(params): Json<StreakParams>,
) -> ApiResult<StreakResult> {
    state
        .service
        .wellness_streak(params)
        .map(Json)
        .map_err(map_err)
}

#[debug_handler]
async fn wellness_trend(
    State(state): State<Arc<AppState>>,
    Json(params): Json<TrendParams>,
) -> Json<TrendResult> {
    Json(state.service.mood_trends(params))
}

#[debug_handler]
async fn dashboard(
    State(state): State<Arc<AppState>>,
    Json(params): Json<DashboardParams>,
) -> Json<DashboardResult> {
    Json(state.service.dashboard(params))
}

pub fn map_err(e: McpError) -> (StatusCode, String) {
    let status = match &e {
        _ if e.is_client_error() => StatusCode::BAD_REQUEST,
        McpError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::BAD_GATEWAY,
    };
    if status.is_server_error() {
        tracing::warn!(%status, error = %e, "request failed");
    }
    (status, e.to_string())
}

/// Build the full application: JSON routes, `/health`, `/metrics` and the
/// streamable-HTTP MCP transport under `/mcp`.
pub fn router(state: Arc<AppState>, handler: GameMoodMcpHandler, max_body_bytes: usize) -> Router {
    let factory = move || -> Result<_, std::io::Error> { Ok(handler.clone()) };
    let session = Arc::new(
        rmcp::transport::streamable_http_server::session::local::LocalSessionManager::default(),
    );
    let mcp_service = rmcp::transport::streamable_http_server::tower::StreamableHttpService::new(
        factory,
        session,
        rmcp::transport::streamable_http_server::tower::StreamableHttpServerConfig::default(),
    );

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_endpoint))
        .route("/recommendations", post(recommendations))
        .route("/wellness/metrics", post(wellness_metrics))
        .route("/wellness/streak", post(wellness_streak))
        .route("/wellness/trend", post(wellness_trend))
        .route("/dashboard", post(dashboard))
        .nest_service("/mcp", mcp_service)
        .layer(axum::extract::DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
