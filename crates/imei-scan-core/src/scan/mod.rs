//! Scan pipeline: build payload, call provider, extract JSON, fill missing field.

pub mod extractor;
pub mod input;
pub mod pipeline;
pub mod policy;
pub mod prompt;
pub mod request_builder;

pub use extractor::extract;
pub use input::ScanRequest;
pub use request_builder::{build_payload, Intent};
