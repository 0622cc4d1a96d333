//! Configuration and constants for the extraction engine.

use clap::ValueEnum;

/// Fixed literal prefix that marks the first line of a traceback dump
pub const TRACEBACK_START_PREFIX: &str = "Traceback ";

/// Delimiter used when joining frame function names into a stack signature
pub const SIGNATURE_DELIMITER: &str = ", ";

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable blocks, one per failure
    #[default]
    Text,
    /// One top-level JSON array of record objects
    Json,
}

/// Options recognized by a single engine run
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Report output format
    pub output_format: OutputFormat,

    /// Emit repeated stack signatures instead of suppressing them
    pub include_duplicates: bool,

    /// Include the verbatim traceback lines in the report
    pub include_raw: bool,
}
