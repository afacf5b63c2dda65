//! Scan router and the state it shares across requests.

use axum::{routing::post, Router};
use std::sync::Arc;

use crate::handlers::handle_scan;
use crate::scan::pipeline::ScanPipeline;

pub const SCAN_PATH: &str = "/scan-imeis";

/// Shared, read-only request handler state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ScanPipeline>,
}

impl AppState {
    pub fn new(pipeline: ScanPipeline) -> Self {
        Self { pipeline: Arc::new(pipeline) }
    }
}

/// `POST /scan-imeis`, state already applied.
pub fn build_scan_router(state: AppState) -> Router {
    Router::new().route(SCAN_PATH, post(handle_scan)).with_state(state)
}
