use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, info, warn, Instrument};
use uuid::Uuid;

use imei_scan_types::{ExtractedResult, ScanError, ScanResult};

use crate::common::sanitize_error::client_message;
use crate::scan::input::{ScanRequest, IMAGE_FIELD};
use crate::server::AppState;

/// `ScanError` at the HTTP boundary: status code plus `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub ScanError);

impl From<ScanError> for ApiError {
    fn from(err: ScanError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_client_error() {
            warn!("[Scan] Rejected request: {}", self.0);
        } else if self.0.is_provider_failure() {
            error!("[Scan] Upstream call failed: {}", self.0);
        } else {
            error!("[Scan] Request failed: {}", self.0);
        }

        (status, Json(json!({ "error": client_message(&self.0) }))).into_response()
    }
}

/// `POST /scan-imeis`
///
/// The credential check runs before the body is looked at, so an
/// unconfigured server answers 500 whatever the caller sent.
pub async fn handle_scan(
    State(state): State<AppState>,
    body: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<ExtractedResult>, ApiError> {
    let request_id = Uuid::new_v4();
    run_scan(state, body)
        .instrument(tracing::info_span!("scan", %request_id))
        .await
        .map(Json)
        .map_err(ApiError::from)
}

async fn run_scan(
    state: AppState,
    body: Result<Json<ScanRequest>, JsonRejection>,
) -> ScanResult<ExtractedResult> {
    let pipeline = &state.pipeline;
    let api_key = pipeline.api_key()?;

    let Json(request) = body.map_err(rejection_to_error)?;
    let image = request.into_image()?;
    info!("[Scan] Request accepted: {} ({} base64 chars)", image.mime_type, image.data.len());

    pipeline.scan(api_key, &image).await
}

fn rejection_to_error(rejection: JsonRejection) -> ScanError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            ScanError::MissingInput { field: IMAGE_FIELD.to_string() }
        },
        other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => ScanError::PayloadTooLarge,
        other => ScanError::InvalidInput { message: other.body_text() },
    }
}
