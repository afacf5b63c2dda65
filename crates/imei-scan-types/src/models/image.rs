use serde::{Deserialize, Serialize};

use crate::protocol::{InlineData, Part};

/// MIME type assumed when the caller does not name one.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Caller-supplied image, kept base64-encoded exactly as received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageInput {
    pub data: String,
    pub mime_type: String,
}

impl ImageInput {
    pub fn new(data: impl Into<String>, mime_type: Option<&str>) -> Self {
        let mime_type = mime_type
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string();
        Self { data: data.into(), mime_type }
    }

    /// The inline-data part carrying this image.
    pub fn to_part(&self) -> Part {
        Part::InlineData {
            inline_data: InlineData { mime_type: self.mime_type.clone(), data: self.data.clone() },
        }
    }
}

impl From<InlineData> for ImageInput {
    fn from(inline: InlineData) -> Self {
        Self::new(inline.data, Some(&inline.mime_type))
    }
}
