//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while emitting the report
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Failed to write report: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize record: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Errors that can occur while compiling a rule table
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Invalid rule pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Failed to read rules file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Failed to parse rules file: {0}")]
    ParseFailed(#[from] serde_json::Error),
}

/// Errors that can abort an engine run
///
/// Malformed input is never an error: unmatched lines fall through the
/// pattern table and missing timestamps stay null. Only I/O failures on the
/// input or the report sink abort a run, and they propagate unmodified.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Input read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Emit(#[from] EmitError),
}
