use std::time::Duration;

/// Build the outbound HTTP client with a per-request deadline.
///
/// `timeout_secs` is used as given; callers apply the configured floor.
pub fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .tcp_nodelay(true)
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))
}
