//! Client-facing error messages.
//!
//! Pattern: log the raw provider body or completion text server-side,
//! return only an opaque message (plus the HTTP status for provider
//! failures) to the caller.

use imei_scan_types::ScanError;

/// Message safe to echo in the `{"error": ...}` response body.
pub fn client_message(err: &ScanError) -> String {
    match err {
        ScanError::MissingCredential => "Missing API key".to_string(),
        ScanError::MissingInput { .. } => "Image data missing".to_string(),
        ScanError::InvalidInput { message } => message.clone(),
        ScanError::PayloadTooLarge => err.to_string(),
        ScanError::Provider { status, body } => sanitize_upstream_error(*status, body),
        ScanError::Transport { message } if message.contains("timed out") => {
            "Gemini API timed out".to_string()
        },
        ScanError::Transport { .. } => "Gemini API unreachable".to_string(),
        ScanError::MalformedResponse { .. } | ScanError::MissingField { .. } => err.to_string(),
    }
}

/// Generic message carrying only the status code and a coarse category.
pub fn sanitize_upstream_error(status_code: u16, raw_text: &str) -> String {
    let category = match classify_error(status_code, raw_text) {
        ErrorCategory::RateLimited => "rate limited",
        ErrorCategory::QuotaExhausted => "quota exhausted",
        ErrorCategory::Unauthorized => "authentication failed",
        ErrorCategory::ModelNotFound => "model not available",
        ErrorCategory::BadRequest => "request rejected",
        ErrorCategory::ServerError => "upstream server error",
        ErrorCategory::Unknown => "upstream error",
    };
    format!("Gemini API failed: {} ({})", status_code, category)
}

enum ErrorCategory {
    RateLimited,
    QuotaExhausted,
    Unauthorized,
    ModelNotFound,
    BadRequest,
    ServerError,
    Unknown,
}

fn classify_error(status_code: u16, raw_text: &str) -> ErrorCategory {
    match status_code {
        429 => {
            if raw_text.contains("QUOTA_EXHAUSTED") || raw_text.contains("quota") {
                ErrorCategory::QuotaExhausted
            } else {
                ErrorCategory::RateLimited
            }
        },
        401 | 403 => ErrorCategory::Unauthorized,
        // Gemini answers an invalid key with 400 API_KEY_INVALID
        400 if raw_text.contains("API_KEY_INVALID") => ErrorCategory::Unauthorized,
        400 => ErrorCategory::BadRequest,
        404 => ErrorCategory::ModelNotFound,
        500..=599 => ErrorCategory::ServerError,
        _ => ErrorCategory::Unknown,
    }
}
