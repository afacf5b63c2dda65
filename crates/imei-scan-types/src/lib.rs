//! # IMEI Scan Types
//!
//! Core types, models, and error definitions for the IMEI label scanner.
//!
//! - **`error`** - Typed error hierarchy for scans and configuration
//! - **`models`** - Domain models (image input, extracted records, config)
//! - **`protocol`** - Gemini GenerateContent wire types
//!
//! ## Architecture Role
//!
//! ```text
//!        imei-scan-types (this crate)
//!                 │
//!                 ▼
//!          imei-scan-core
//!                 │
//!                 ▼
//!         imei-scan-server
//! ```

pub mod error;
pub mod models;
pub mod protocol;

pub use error::{ConfigError, ScanError, ScanResult};
pub use models::{
    ExtractedResult, ExtractionStrategy, ImageInput, MissingFieldPolicy, ResultShape, ScanConfig,
    ServerConfig,
};
