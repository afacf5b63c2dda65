//! Scan pipeline errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while serving a scan request.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ScanError {
    /// Provider API key is not configured
    #[error("Missing API key")]
    MissingCredential,

    /// Caller omitted a required input field
    #[error("Missing input: {field}")]
    MissingInput { field: String },

    /// Caller supplied an input that cannot be used
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Request body exceeded the configured limit
    #[error("Request body too large")]
    PayloadTooLarge,

    /// Provider answered with a non-success status
    #[error("Gemini API failed: {status}")]
    Provider {
        status: u16,
        /// Raw response body, for server-side diagnostics only
        body: String,
    },

    /// Network-level failure (DNS, connect, reset, timeout)
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Provider text did not contain the expected JSON shape
    #[error("Malformed AI response.")]
    MalformedResponse {
        /// Offending completion text, for server-side diagnostics only
        raw: String,
    },

    /// A required field stayed absent after extraction
    #[error("Required field missing from AI response: {field}")]
    MissingField { field: String },
}

impl ScanError {
    /// Check if this error was caused by the caller's request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingInput { .. } | Self::InvalidInput { .. } | Self::PayloadTooLarge
        )
    }

    /// Check if this error came back from (or on the way to) the provider.
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, Self::Provider { .. } | Self::Transport { .. })
    }

    /// Get HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::PayloadTooLarge => 413,
            Self::MissingInput { .. } | Self::InvalidInput { .. } => 400,
            _ => 500,
        }
    }
}
