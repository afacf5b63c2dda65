use clap::Parser;

use imei_scan_types::models::config::{
    DEFAULT_BASE_URL, DEFAULT_BODY_LIMIT, DEFAULT_MODEL, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS,
};
use imei_scan_types::{
    ConfigError, ExtractionStrategy, MissingFieldPolicy, ResultShape, ScanConfig, ServerConfig,
};

#[derive(Parser, Debug)]
#[command(
    name = "imei-scan-server",
    about = "IMEI Scan Server - reads IMEI numbers off label photos via Gemini",
    version = env!("CARGO_PKG_VERSION"),
    author
)]
pub struct Cli {
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "ALLOWED_ORIGIN", help = "Single allowed CORS origin (default: any)")]
    pub allowed_origin: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, env = "SCAN_RESULT_SHAPE", default_value = "array", help = "array | object")]
    pub result_shape: ResultShape,

    #[arg(
        long,
        env = "SCAN_ON_MISSING_FIELD",
        default_value = "retry-once",
        help = "fail | retry-once | degrade"
    )]
    pub on_missing_field: MissingFieldPolicy,

    #[arg(
        long,
        env = "SCAN_EXTRACTION",
        default_value = "fenced-then-bracket",
        help = "bracket-scan | fenced-then-bracket | strict"
    )]
    pub extraction: ExtractionStrategy,

    #[arg(long, env = "GEMINI_JSON_RESPONSE", default_value_t = false)]
    pub json_response: bool,

    #[arg(long, env = "PROVIDER_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[arg(long, env = "BODY_LIMIT_BYTES", default_value_t = DEFAULT_BODY_LIMIT)]
    pub body_limit: usize,

    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Freeze the parsed arguments into the startup configuration.
    pub fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let config = ServerConfig {
            host: self.host,
            port: self.port,
            allowed_origin: self.allowed_origin.filter(|o| !o.trim().is_empty()),
            body_limit: self.body_limit,
            scan: ScanConfig {
                api_key: self.api_key,
                model: self.model,
                base_url: self.base_url,
                result_shape: self.result_shape,
                on_missing_field: self.on_missing_field,
                extraction: self.extraction,
                json_response_mode: self.json_response,
                timeout_secs: self.timeout_secs,
            },
        };
        config.validate()?;
        Ok(config)
    }
}
