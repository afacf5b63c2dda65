//! Inbound request body and its conversion into an `ImageInput`.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::Deserialize;

use imei_scan_types::protocol::{Content, GenerateContentRequest};
use imei_scan_types::{ImageInput, ScanError, ScanResult};

pub const IMAGE_FIELD: &str = "base64Image";

/// Standard alphabet, padding optional. Phone cameras and browser
/// encoders disagree on trailing `=`.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Body of `POST /scan-imeis`.
///
/// Either `{"base64Image": "...", "mimeType": "..."}` or a provider-shaped
/// `{"contents": [...]}` from older clients. In the latter case only the
/// first inline image is used; the caller's prompt is discarded.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    #[serde(default)]
    pub base64_image: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub contents: Option<Vec<Content>>,
}

impl ScanRequest {
    pub fn into_image(self) -> ScanResult<ImageInput> {
        if let Some(raw) = self.base64_image.filter(|d| !d.trim().is_empty()) {
            let (data, data_url_mime) = split_data_url(&raw);
            let mime_type = self.mime_type.as_deref().or(data_url_mime);
            return validated(ImageInput::new(data, mime_type));
        }

        if let Some(contents) = self.contents {
            let legacy = GenerateContentRequest { contents, generation_config: None };
            let inline = legacy
                .first_inline_data()
                .cloned()
                .ok_or_else(|| ScanError::InvalidInput {
                    message: "contents carries no inline image part".to_string(),
                })?;
            return validated(ImageInput::from(inline));
        }

        Err(ScanError::MissingInput { field: IMAGE_FIELD.to_string() })
    }
}

/// Split `data:image/png;base64,AAAA` into (`AAAA`, `Some("image/png")`).
/// Anything else is returned unchanged.
fn split_data_url(raw: &str) -> (String, Option<&str>) {
    let trimmed = raw.trim();
    if let Some(rest) = trimmed.strip_prefix("data:") {
        if let Some((meta, data)) = rest.split_once(',') {
            if let Some(mime) = meta.strip_suffix(";base64") {
                let mime = Some(mime).filter(|m| !m.is_empty());
                return (data.to_string(), mime);
            }
        }
    }
    (trimmed.to_string(), None)
}

fn validated(mut image: ImageInput) -> ScanResult<ImageInput> {
    image.data.retain(|c| !c.is_ascii_whitespace());
    if LENIENT_BASE64.decode(&image.data).is_err() {
        return Err(ScanError::InvalidInput {
            message: format!("{} is not valid base64", IMAGE_FIELD),
        });
    }
    Ok(image)
}
