use serde::Serialize;
use serde_json::{Map, Value};

/// Parsed scan result, in whichever shape the server is configured for.
///
/// Array elements are passed through untouched: the model may quote the
/// IMEI, emit it as a bare number, or add attributes of its own.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ExtractedResult {
    /// Array shape: `[{"imei": "..."}, ...]`
    Records(Vec<Value>),
    /// Object shape: `{"imei": "...", ...}`, `imei` possibly absent
    Object(Map<String, Value>),
}
