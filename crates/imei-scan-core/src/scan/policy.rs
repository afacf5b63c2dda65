//! Missing-field handling for the object result shape.

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use imei_scan_types::{ImageInput, MissingFieldPolicy, ScanError, ScanResult};

use super::request_builder::{build_payload, Intent};
use crate::upstream::client::ProviderClient;

pub const IMEI_FIELD: &str = "imei";

/// Absent, `null` and blank strings all count as missing.
pub fn is_missing(object: &Map<String, Value>, field: &str) -> bool {
    match object.get(field) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Keep only ASCII digits.
pub fn strip_non_digits(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Everything a targeted follow-up needs: same provider, key and image.
pub struct MissingFieldResolver<'a> {
    provider: &'a dyn ProviderClient,
    api_key: &'a str,
    image: &'a ImageInput,
}

impl<'a> MissingFieldResolver<'a> {
    pub fn new(provider: &'a dyn ProviderClient, api_key: &'a str, image: &'a ImageInput) -> Self {
        Self { provider, api_key, image }
    }

    /// Apply `policy` to `object` if it has no usable `imei`.
    ///
    /// At most one extra provider call is made, and only for `RetryOnce`.
    pub async fn resolve(
        &self,
        policy: MissingFieldPolicy,
        mut object: Map<String, Value>,
    ) -> ScanResult<Map<String, Value>> {
        if !is_missing(&object, IMEI_FIELD) {
            return Ok(object);
        }

        match policy {
            MissingFieldPolicy::Fail => {
                Err(ScanError::MissingField { field: IMEI_FIELD.to_string() })
            },
            MissingFieldPolicy::Degrade => {
                debug!("[Scan] imei missing, returning object as-is");
                Ok(object)
            },
            MissingFieldPolicy::RetryOnce => {
                info!("[Scan] imei missing from first answer, issuing targeted request");
                match self.targeted_digits().await {
                    Some(digits) => {
                        object.insert(IMEI_FIELD.to_string(), Value::String(digits));
                    },
                    None => warn!("[Scan] targeted request found no imei candidate"),
                }
                Ok(object)
            },
        }
    }

    async fn targeted_digits(&self) -> Option<String> {
        let payload = build_payload(self.image, Intent::Targeted, false);
        let response = match self.provider.generate_content(self.api_key, &payload).await {
            Ok(response) => response,
            Err(e) => {
                warn!("[Scan] targeted request failed: {}", e);
                return None;
            },
        };

        let text = response.first_text()?;
        let digits = strip_non_digits(&text);
        if digits.is_empty() {
            debug!("[Scan] targeted answer had no digits: {:?}", text);
            None
        } else {
            Some(digits)
        }
    }
}
