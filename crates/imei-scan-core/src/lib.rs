//! # IMEI Scan Core
//!
//! Scan pipeline for reading IMEI numbers off photographed labels.
//!
//! ```text
//! imei-scan-core/src/
//! ├── scan/         # payload builder, JSON extraction, missing-field policy, pipeline
//! ├── upstream/     # provider call adapter (Gemini over reqwest)
//! ├── handlers/     # axum handler for POST /scan-imeis
//! ├── middleware/   # CORS
//! ├── common/       # HTTP client builder, client-facing error messages
//! └── server.rs     # AppState + scan router
//! ```

#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)
)]

pub mod common;
pub mod handlers;
pub mod middleware;
pub mod scan;
pub mod server;
pub mod upstream;

pub use scan::pipeline::ScanPipeline;
pub use server::{build_scan_router, AppState, SCAN_PATH};
pub use upstream::client::{GeminiClient, ProviderClient};

#[cfg(test)]
mod test_helpers;
