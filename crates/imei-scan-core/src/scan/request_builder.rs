//! Builds the GenerateContent payload for one provider attempt.

use imei_scan_types::protocol::{Content, GeminiRole, GenerateContentRequest, GenerationConfig, Part};
use imei_scan_types::{ImageInput, ResultShape};

use super::prompt::{FULL_ARRAY_PROMPT, FULL_OBJECT_PROMPT, TARGETED_IMEI_PROMPT};

const JSON_MIME_TYPE: &str = "application/json";

/// What the attempt asks the model for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Every IMEI 1 on the label, as JSON of the given shape
    Full(ResultShape),
    /// Only the raw digits next to the "IMEI#" label
    Targeted,
}

impl Intent {
    pub fn prompt(self) -> &'static str {
        match self {
            Intent::Full(ResultShape::Array) => FULL_ARRAY_PROMPT,
            Intent::Full(ResultShape::Object) => FULL_OBJECT_PROMPT,
            Intent::Targeted => TARGETED_IMEI_PROMPT,
        }
    }
}

/// Assemble the payload: prompt text first, then the inline image.
///
/// `json_response_mode` only affects the full intent; the targeted answer is
/// plain digits.
pub fn build_payload(
    image: &ImageInput,
    intent: Intent,
    json_response_mode: bool,
) -> GenerateContentRequest {
    let generation_config = match intent {
        Intent::Full(_) if json_response_mode => Some(GenerationConfig {
            temperature: Some(0.0),
            response_mime_type: Some(JSON_MIME_TYPE.to_string()),
        }),
        _ => None,
    };

    GenerateContentRequest {
        contents: vec![Content {
            role: Some(GeminiRole::User),
            parts: vec![Part::text(intent.prompt()), image.to_part()],
        }],
        generation_config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ImageInput {
        ImageInput::new("aW1laS1sYWJlbA==", None)
    }

    #[test]
    fn test_full_payload_orders_text_then_image() {
        let payload = build_payload(&image(), Intent::Full(ResultShape::Array), false);

        assert_eq!(payload.contents.len(), 1);
        let parts = &payload.contents[0].parts;
        assert_eq!(parts.len(), 2);
        assert!(parts[0].as_text().is_some_and(|t| t.contains("IMEI 1")));
        let inline = parts[1].as_inline_data().expect("image part");
        assert_eq!(inline.mime_type, "image/jpeg");
        assert_eq!(inline.data, "aW1laS1sYWJlbA==");
        assert!(payload.generation_config.is_none());
    }

    #[test]
    fn test_full_prompt_ignores_other_identifiers() {
        let prompt = Intent::Full(ResultShape::Array).prompt();
        for ignored in ["IMEI 2", "S/N", "MEID"] {
            assert!(prompt.contains(ignored), "prompt should mention {}", ignored);
        }
        assert!(Intent::Full(ResultShape::Object).prompt().contains("JSON object"));
    }

    #[test]
    fn test_targeted_payload_reuses_identical_image_part() {
        let image = image();
        let full = build_payload(&image, Intent::Full(ResultShape::Object), true);
        let targeted = build_payload(&image, Intent::Targeted, true);

        assert_eq!(full.contents[0].parts[1], targeted.contents[0].parts[1]);
        assert!(targeted.contents[0].parts[0].as_text().is_some_and(|t| t.contains("IMEI#")));
        assert!(targeted.generation_config.is_none());
    }

    #[test]
    fn test_json_response_mode_sets_mime_type() {
        let payload = build_payload(&image(), Intent::Full(ResultShape::Array), true);
        let config = payload.generation_config.expect("generation config");
        assert_eq!(config.response_mime_type.as_deref(), Some("application/json"));
    }
}
