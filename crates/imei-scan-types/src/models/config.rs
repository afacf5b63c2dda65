//! Server and scan pipeline configuration models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

// ============================================================================
// Enums
// ============================================================================

/// Shape of the JSON returned to the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ResultShape {
    /// `[{"imei": "..."}, ...]`, fail fast on malformed text
    #[default]
    Array,
    /// Single object with an `imei` field plus other attributes
    Object,
}

impl fmt::Display for ResultShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultShape::Array => write!(f, "array"),
            ResultShape::Object => write!(f, "object"),
        }
    }
}

impl FromStr for ResultShape {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "array" => Ok(ResultShape::Array),
            "object" => Ok(ResultShape::Object),
            other => Err(ConfigError::invalid(
                "result_shape",
                format!("unknown shape '{}', expected array or object", other),
            )),
        }
    }
}

impl ResultShape {
    /// Opening and closing delimiters of the JSON fragment for this shape.
    pub fn delimiters(self) -> (char, char) {
        match self {
            ResultShape::Array => ('[', ']'),
            ResultShape::Object => ('{', '}'),
        }
    }
}

/// What to do when the object shape comes back without `imei`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MissingFieldPolicy {
    /// Answer with an error
    Fail,
    /// Issue one targeted follow-up call, then degrade
    #[default]
    RetryOnce,
    /// Return the object without the field
    Degrade,
}

impl fmt::Display for MissingFieldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingFieldPolicy::Fail => write!(f, "fail"),
            MissingFieldPolicy::RetryOnce => write!(f, "retry-once"),
            MissingFieldPolicy::Degrade => write!(f, "degrade"),
        }
    }
}

impl FromStr for MissingFieldPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "fail" => Ok(MissingFieldPolicy::Fail),
            "retry-once" | "retry" => Ok(MissingFieldPolicy::RetryOnce),
            "degrade" => Ok(MissingFieldPolicy::Degrade),
            other => Err(ConfigError::invalid(
                "on_missing_field",
                format!("unknown policy '{}', expected fail, retry-once or degrade", other),
            )),
        }
    }
}

/// How a JSON fragment is located inside the completion text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionStrategy {
    /// First opening delimiter to last closing delimiter
    BracketScan,
    /// A ```json fenced block if one parses, else bracket scan
    #[default]
    FencedThenBracket,
    /// The whole trimmed text must be the JSON value
    Strict,
}

impl fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionStrategy::BracketScan => write!(f, "bracket-scan"),
            ExtractionStrategy::FencedThenBracket => write!(f, "fenced-then-bracket"),
            ExtractionStrategy::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for ExtractionStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "bracket-scan" | "bracket" => Ok(ExtractionStrategy::BracketScan),
            "fenced-then-bracket" | "fenced" => Ok(ExtractionStrategy::FencedThenBracket),
            "strict" => Ok(ExtractionStrategy::Strict),
            other => Err(ConfigError::invalid(
                "extraction",
                format!(
                    "unknown strategy '{}', expected bracket-scan, fenced-then-bracket or strict",
                    other
                ),
            )),
        }
    }
}

// ============================================================================
// Scan configuration
// ============================================================================

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const MIN_TIMEOUT_SECS: u64 = 5;

/// Everything the scan pipeline needs, fixed at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanConfig {
    /// Provider API key; `None` makes every scan fail with `MissingCredential`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub result_shape: ResultShape,
    pub on_missing_field: MissingFieldPolicy,
    pub extraction: ExtractionStrategy,
    /// Ask the provider for `application/json` output on the full-intent call
    pub json_response_mode: bool,
    pub timeout_secs: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            result_shape: ResultShape::default(),
            on_missing_field: MissingFieldPolicy::default(),
            extraction: ExtractionStrategy::default(),
            json_response_mode: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ScanConfig {
    /// API key, treating blank values as unset.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs.max(MIN_TIMEOUT_SECS)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::invalid("model", "must not be empty"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::invalid("base_url", "must be an http(s) URL"));
        }
        Ok(())
    }
}

// ============================================================================
// Server configuration
// ============================================================================

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Process-wide configuration, built once and shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Single allowed CORS origin; `None` allows any origin
    pub allowed_origin: Option<String>,
    pub body_limit: usize,
    pub scan: ScanConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            allowed_origin: None,
            body_limit: DEFAULT_BODY_LIMIT,
            scan: ScanConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn get_bind_address(&self) -> &str {
        if self.host.trim().is_empty() {
            "0.0.0.0"
        } else {
            self.host.trim()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.body_limit == 0 {
            return Err(ConfigError::invalid("body_limit", "must be greater than zero"));
        }
        if let Some(origin) = &self.allowed_origin {
            if origin.trim().is_empty() || origin.trim() == "*" {
                return Err(ConfigError::invalid(
                    "allowed_origin",
                    "leave unset to allow any origin",
                ));
            }
        }
        self.scan.validate()
    }
}
