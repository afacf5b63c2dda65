//! One scan, end to end: payload → provider → extraction → missing-field policy.

use std::sync::Arc;
use tracing::{debug, info, warn};

use imei_scan_types::{ConfigError, ExtractedResult, ImageInput, ScanConfig, ScanError, ScanResult};

use super::extractor::extract;
use super::policy::MissingFieldResolver;
use super::request_builder::{build_payload, Intent};
use crate::upstream::client::{GeminiClient, ProviderClient};

/// Immutable per-process scan service shared by all requests.
pub struct ScanPipeline {
    config: Arc<ScanConfig>,
    provider: Arc<dyn ProviderClient>,
}

impl ScanPipeline {
    pub fn new(config: Arc<ScanConfig>, provider: Arc<dyn ProviderClient>) -> Self {
        Self { config, provider }
    }

    /// Pipeline talking to the Gemini REST API described by `config`.
    pub fn from_config(config: ScanConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let provider = Arc::new(GeminiClient::new(&config)?);
        Ok(Self::new(Arc::new(config), provider))
    }

    /// Configured API key, or `MissingCredential`.
    pub fn api_key(&self) -> ScanResult<&str> {
        self.config.api_key().ok_or(ScanError::MissingCredential)
    }

    pub async fn scan(&self, api_key: &str, image: &ImageInput) -> ScanResult<ExtractedResult> {
        let shape = self.config.result_shape;
        let payload = build_payload(image, Intent::Full(shape), self.config.json_response_mode);

        let response = self.provider.generate_content(api_key, &payload).await?;
        let text = response.first_text().unwrap_or_default();
        debug!("[Scan] completion text: {} chars", text.len());

        let result = extract(&text, shape, self.config.extraction).inspect_err(|_| {
            warn!("[Scan] malformed completion ({} strategy): {:?}", self.config.extraction, text);
        })?;

        match result {
            ExtractedResult::Records(records) => {
                info!("[Scan] extracted {} imei record(s)", records.len());
                Ok(ExtractedResult::Records(records))
            },
            ExtractedResult::Object(object) => {
                let resolver = MissingFieldResolver::new(self.provider.as_ref(), api_key, image);
                let object = resolver.resolve(self.config.on_missing_field, object).await?;
                Ok(ExtractedResult::Object(object))
            },
        }
    }
}
