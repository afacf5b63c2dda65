//! IMEI Scan Server - Headless Daemon
//!
//! A small HTTP server that:
//! - Accepts a base64 label photo on POST /scan-imeis
//! - Asks Gemini for the IMEI 1 barcode numbers on it
//! - Returns the extracted JSON to the caller
//!
//! Access via: http://localhost:3000

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod cli;
mod router;
mod server_utils;

use imei_scan_core::{AppState, ScanPipeline};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal in production
    let _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.into_config()?;

    info!("🚀 IMEI Scan Server starting on port {}...", config.port);
    info!(
        "🔧 Model: {} | shape: {} | missing field: {} | extraction: {}",
        config.scan.model,
        config.scan.result_shape,
        config.scan.on_missing_field,
        config.scan.extraction
    );
    if config.scan.api_key().is_none() {
        warn!("⚠️ GEMINI_API_KEY is not set, every scan request will fail with 500");
    }
    match &config.allowed_origin {
        Some(origin) => info!("🌍 CORS restricted to {}", origin),
        None => info!("🌍 CORS open to any origin"),
    }

    let pipeline = ScanPipeline::from_config(config.scan.clone())?;
    let app = router::build_router(AppState::new(pipeline), &config);

    let listener = server_utils::create_listener(&config).await?;
    info!("🌐 Backend live on http://{}", listener.local_addr()?);

    axum::serve(listener, app).with_graceful_shutdown(server_utils::shutdown_signal()).await?;

    info!("👋 Server stopped");
    Ok(())
}
