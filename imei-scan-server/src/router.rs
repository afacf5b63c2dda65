use axum::{extract::DefaultBodyLimit, http::StatusCode, response::IntoResponse, routing::get, Router};
use tower_http::trace::TraceLayer;

use imei_scan_core::middleware::cors_layer;
use imei_scan_core::{build_scan_router, AppState};
use imei_scan_types::ServerConfig;

pub const LIVENESS_TEXT: &str = "IMEI Gemini Backend is running.";

pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let public_routes = Router::new()
        .route("/", get(liveness))
        .route("/health", get(health_check))
        .route("/healthz", get(health_check));

    public_routes
        .merge(build_scan_router(state))
        .layer(DefaultBodyLimit::max(config.body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.allowed_origin.as_deref()))
}

async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, axum::Json(serde_json::json!({"status": "ok"})))
}
