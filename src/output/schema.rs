//! JSON report element definitions.
//!
//! This module defines the structure of the objects written into the
//! report array, decoupled from the in-memory record type.

use crate::analyzer::TraceRecord;
use serde::{Deserialize, Serialize};

/// Structured description of one failure, as serialized into the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDescription {
    /// Timestamp recovered from the preceding log line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Message text recovered from the preceding log line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Final exception line of the dump
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_text: Option<String>,

    /// Comma-space-joined stack signature
    pub stack: String,

    /// Individual frames, in dump order
    pub frames: Vec<FrameDescription>,

    /// Notes attached by annotation rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<String>,
}

/// One frame of the description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameDescription {
    pub function: String,
    pub file: String,
    pub line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Report element used when raw inclusion is requested: the structured
/// description plus the verbatim source text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub record: RecordDescription,
    pub raw: String,
}

/// Convert a record into its report description.
pub fn describe(record: &TraceRecord) -> RecordDescription {
    RecordDescription {
        timestamp: record.timestamp.clone(),
        error_message: record.error_message.clone(),
        failure_text: record.failure_text.clone(),
        stack: record.stack_signature(),
        frames: record
            .frames
            .iter()
            .map(|f| FrameDescription {
                function: f.function.clone(),
                file: f.file.clone(),
                line: f.line,
                source: f.source.clone(),
            })
            .collect(),
        annotations: record.annotations.clone(),
    }
}
