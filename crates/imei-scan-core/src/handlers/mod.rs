// Handlers module - HTTP entry points for the scan API

pub mod scan;

pub use scan::{handle_scan, ApiError};
