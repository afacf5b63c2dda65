//! Typed error definitions for the IMEI scanner.
//!
//! Errors are serializable for diagnostics, displayable for logging and
//! matchable for the HTTP boundary, which maps each variant to a status code.

mod config;
mod scan;

pub use config::ConfigError;
pub use scan::ScanError;

/// Standard Result type for scan operations.
pub type ScanResult<T> = std::result::Result<T, ScanError>;
