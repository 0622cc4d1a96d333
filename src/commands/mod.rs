//! CLI command implementations.

pub mod models;
pub mod scan;

// Re-export main types
pub use models::ScanArgs;
pub use scan::{execute_scan, validate_args};
