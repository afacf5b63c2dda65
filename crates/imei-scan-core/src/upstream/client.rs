//! Provider call adapter.
//!
//! One synchronous `generateContent` call per invocation. Non-success
//! statuses become `ScanError::Provider` with the raw body attached;
//! network failures become `ScanError::Transport`. Nothing is retried here.

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, error};

use imei_scan_types::protocol::{GenerateContentRequest, GenerateContentResponse};
use imei_scan_types::{ConfigError, ScanConfig, ScanError, ScanResult};

use crate::common::client_builder::build_http_client;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Anything that can answer a GenerateContent request.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    async fn generate_content(
        &self,
        api_key: &str,
        payload: &GenerateContentRequest,
    ) -> ScanResult<GenerateContentResponse>;
}

/// Gemini REST API client (`{base_url}/models/{model}:generateContent`).
pub struct GeminiClient {
    http_client: Client,
    endpoint: String,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(config: &ScanConfig) -> Result<Self, ConfigError> {
        let base_url = config.base_url.trim().trim_end_matches('/');
        if url::Url::parse(base_url).is_err() {
            return Err(ConfigError::invalid("base_url", format!("not a valid URL: {}", base_url)));
        }

        let timeout_secs = config.effective_timeout_secs();
        let http_client =
            build_http_client(timeout_secs).map_err(|e| ConfigError::invalid("http_client", e))?;

        Ok(Self {
            http_client,
            endpoint: build_url(base_url, config.model.trim()),
            timeout_secs,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport_error(&self, e: &reqwest::Error) -> ScanError {
        let message = if e.is_timeout() {
            format!("request timed out after {}s", self.timeout_secs)
        } else if e.is_connect() {
            format!("connection failed: {}", e)
        } else {
            e.to_string()
        };
        ScanError::Transport { message }
    }
}

pub fn build_url(base_url: &str, model: &str) -> String {
    format!("{}/models/{}:generateContent", base_url, model)
}

#[async_trait]
impl ProviderClient for GeminiClient {
    async fn generate_content(
        &self,
        api_key: &str,
        payload: &GenerateContentRequest,
    ) -> ScanResult<GenerateContentResponse> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            error!("[Gemini] Upstream returned {}: {}", status.as_u16(), body);
            return Err(ScanError::Provider { status: status.as_u16(), body });
        }

        debug!("[Gemini] Upstream returned {} ({} bytes)", status.as_u16(), body.len());
        serde_json::from_str(&body).map_err(|e| {
            error!("[Gemini] Undecodable response body: {}", e);
            ScanError::MalformedResponse { raw: body }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        assert_eq!(
            build_url("https://generativelanguage.googleapis.com/v1beta", "gemini-1.5-flash-latest"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent"
        );
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let config =
            ScanConfig { base_url: "http://127.0.0.1:9/v1beta/".to_string(), ..ScanConfig::default() };
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://127.0.0.1:9/v1beta/models/gemini-1.5-flash-latest:generateContent"
        );
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let config = ScanConfig { base_url: "not a url".to_string(), ..ScanConfig::default() };
        assert!(GeminiClient::new(&config).is_err());
    }
}
