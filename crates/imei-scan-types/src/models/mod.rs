//! Domain models.

pub mod config;
pub mod image;
pub mod result;

pub use config::{ExtractionStrategy, MissingFieldPolicy, ResultShape, ScanConfig, ServerConfig};
pub use image::{ImageInput, DEFAULT_MIME_TYPE};
pub use result::ExtractedResult;
