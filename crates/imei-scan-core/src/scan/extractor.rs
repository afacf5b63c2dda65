//! Locates and parses the JSON fragment embedded in completion text.
//!
//! Extraction is purely textual and deterministic. It never returns a
//! best-effort structure: anything that does not parse into the expected
//! shape is a `MalformedResponse` carrying the raw text.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use imei_scan_types::{ExtractedResult, ExtractionStrategy, ResultShape, ScanError, ScanResult};

static FENCED_JSON_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_fenced_json_regex() -> &'static Regex {
    FENCED_JSON_REGEX.get_or_init(|| {
        Regex::new(r"(?is)```json[ \t]*\r?\n?(.*?)```").expect("Fenced JSON regex is valid")
    })
}

/// Parse `text` into the expected shape using the configured strategy.
pub fn extract(
    text: &str,
    shape: ResultShape,
    strategy: ExtractionStrategy,
) -> ScanResult<ExtractedResult> {
    let found = match strategy {
        ExtractionStrategy::BracketScan => bracket_scan(text, shape),
        ExtractionStrategy::FencedThenBracket => {
            fenced_block(text, shape).or_else(|| bracket_scan(text, shape))
        },
        ExtractionStrategy::Strict => parse_shape(text.trim(), shape),
    };

    found.ok_or_else(|| ScanError::MalformedResponse { raw: text.to_string() })
}

/// First opening delimiter to last closing delimiter, inclusive.
///
/// No balancing: nested delimiters inside string values can defeat it.
pub fn bracket_scan(text: &str, shape: ResultShape) -> Option<ExtractedResult> {
    let (open, close) = shape.delimiters();
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end < start {
        return None;
    }
    parse_shape(&text[start..=end], shape)
}

/// Body of the first ```json fenced block, if it parses into the shape.
pub fn fenced_block(text: &str, shape: ResultShape) -> Option<ExtractedResult> {
    let captures = get_fenced_json_regex().captures(text)?;
    parse_shape(captures.get(1)?.as_str().trim(), shape)
}

fn parse_shape(fragment: &str, shape: ResultShape) -> Option<ExtractedResult> {
    let value: Value = serde_json::from_str(fragment).ok()?;
    match (shape, value) {
        (ResultShape::Array, Value::Array(items)) => Some(ExtractedResult::Records(items)),
        (ResultShape::Object, Value::Object(map)) => Some(ExtractedResult::Object(map)),
        _ => None,
    }
}
