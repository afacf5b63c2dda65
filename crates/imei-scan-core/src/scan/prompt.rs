// Fixed instructional prompts sent alongside the label image.

/// Full extraction, array shape.
pub const FULL_ARRAY_PROMPT: &str = r#"
From the image, extract barcode numbers that are explicitly labeled "IMEI 1".
Ignore all others like "IMEI 2", "S/N", "MEID".
Return a JSON array in this format:
[{"imei": "123456789012345"}, {"imei": "987654321098765"}]
"#;

/// Full extraction, object shape.
pub const FULL_OBJECT_PROMPT: &str = r#"
From the image of the device label, read the barcode number explicitly labeled "IMEI 1".
Ignore all others like "IMEI 2", "S/N", "MEID".
Return a single JSON object in this format:
{"imei": "123456789012345", "model": "...", "serial": "..."}
Include any other attributes you can read from the label as extra fields.
"#;

/// Targeted follow-up when the first answer had no IMEI.
pub const TARGETED_IMEI_PROMPT: &str = r#"
Look at the number printed next to the "IMEI#" label in the image.
Return only the digits of that number, with no other text.
"#;
