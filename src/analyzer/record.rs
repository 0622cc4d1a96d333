//! Structured failure records.
//!
//! A `TraceRecord` is the durable representation of one traceback unit:
//! frames, failure text, the message and timestamp recovered from the
//! preceding log line, and the verbatim body. Built once per unit and
//! immutable afterwards.

use super::rules::RuleSet;
use crate::parser::{extract_timestamp_message, parse_frames, Frame};
use crate::stream::TracebackUnit;
use crate::utils::config::SIGNATURE_DELIMITER;

/// One reconstructed failure.
#[derive(Debug, Clone)]
pub struct TraceRecord {
    /// Call-stack frames in dump order (single synthetic thread)
    pub frames: Vec<Frame>,

    /// Final exception line of the dump, e.g. `ValueError: boom`
    pub failure_text: Option<String>,

    /// Message text recovered from the preceding log line
    pub error_message: Option<String>,

    /// Timestamp recovered from the preceding log line; null when no rule
    /// could date it, never an error
    pub timestamp: Option<String>,

    /// Notes attached by annotation rules, in table order
    pub annotations: Vec<String>,

    /// Verbatim body lines of the unit
    pub raw_lines: Vec<String>,
}

impl TraceRecord {
    /// Ordered, delimiter-joined concatenation of frame function names.
    ///
    /// Stable for textually identical stacks; this is the deduplication key.
    pub fn stack_signature(&self) -> String {
        self.frames
            .iter()
            .map(|f| f.function.as_str())
            .collect::<Vec<_>>()
            .join(SIGNATURE_DELIMITER)
    }

    /// The verbatim body as one block of text.
    pub fn raw_text(&self) -> String {
        self.raw_lines.join("\n")
    }
}

/// Build a record from a completed unit and run the hook passes.
///
/// The unit's associated log line is parsed once through the pattern table:
/// its timestamp and message populate `timestamp` and `error_message`. The
/// failure text comes from the dump itself; the two are kept as distinct
/// fields, never merged. Cleanup rules run first, then annotation rules,
/// both before the record reaches the aggregator.
pub fn build_record(unit: TracebackUnit, rules: &RuleSet) -> TraceRecord {
    let (timestamp, error_message) = match unit.log_message.as_deref() {
        Some(log_line) => {
            let (ts, msg) = extract_timestamp_message(log_line);
            (
                ts.map(str::to_owned),
                msg.filter(|m| !m.is_empty()).map(str::to_owned),
            )
        }
        None => (None, None),
    };

    let (frames, failure_text) = parse_frames(&unit.body_lines);

    let mut record = TraceRecord {
        frames,
        failure_text,
        error_message,
        timestamp,
        annotations: Vec::new(),
        raw_lines: unit.body_lines,
    };

    rules.cleanup(&mut record);
    rules.annotate(&mut record);

    record
}
