//! Report writers.
//!
//! Two modes share one interface: human-readable text blocks and a
//! streaming JSON array. `ReportEmitter` lets the engine drive either
//! without caring which is active.

pub mod json;
pub mod schema;
pub mod text;

// Re-export main types
pub use json::JsonEmitter;
pub use schema::{describe, FrameDescription, RawRecord, RecordDescription};
pub use text::TextEmitter;

use crate::analyzer::TraceRecord;
use crate::utils::config::OutputFormat;
use crate::utils::error::EmitError;
use std::io::Write;

/// Format-dispatching emitter used by the engine.
pub enum ReportEmitter<W: Write> {
    Text(TextEmitter<W>),
    Json(JsonEmitter<W>),
}

impl<W: Write> ReportEmitter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text(TextEmitter::new(writer)),
            OutputFormat::Json => Self::Json(JsonEmitter::new(writer)),
        }
    }

    /// Open the report. A no-op in text mode; writes the array bracket in
    /// JSON mode, so even an empty run produces a well-formed report.
    pub fn begin(&mut self) -> Result<(), EmitError> {
        match self {
            Self::Text(_) => Ok(()),
            Self::Json(emitter) => emitter.begin(),
        }
    }

    pub fn emit(&mut self, record: &TraceRecord, include_raw: bool) -> Result<(), EmitError> {
        match self {
            Self::Text(emitter) => emitter.emit(record, include_raw),
            Self::Json(emitter) => emitter.emit(record, include_raw),
        }
    }

    /// Close the report and flush the sink.
    pub fn finish(&mut self) -> Result<(), EmitError> {
        match self {
            Self::Text(emitter) => emitter.flush(),
            Self::Json(emitter) => emitter.finish(),
        }
    }
}
