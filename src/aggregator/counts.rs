//! Running occurrence counts and the duplicate-suppression decision.
//!
//! Two mappings, both keyed by exact text: failure/error messages and stack
//! signatures. Keys are case-sensitive; no normalization happens here
//! beyond whatever cleanup rules already rewrote.

use crate::analyzer::TraceRecord;
use std::collections::HashMap;

/// Aggregate counters for one run. Monotonically grows; returned to the
/// caller as the run result so summary statistics cover suppressed
/// duplicates too.
#[derive(Debug, Clone, Default)]
pub struct AggregateCounts {
    /// Occurrences keyed by failure text and by error message
    pub messages: HashMap<String, u64>,

    /// Occurrences keyed by stack signature
    pub stacktraces: HashMap<String, u64>,
}

impl AggregateCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one record. Counters update for every record, independent of
    /// whether the emitter later sees it.
    ///
    /// Returns true when the record's stack signature is a repeat (its
    /// count is now greater than 1), which is the suppression signal for
    /// callers running with `include_duplicates` off.
    pub fn observe(&mut self, record: &TraceRecord) -> bool {
        if let Some(text) = &record.failure_text {
            *self.messages.entry(text.clone()).or_insert(0) += 1;
        }
        if let Some(text) = &record.error_message {
            *self.messages.entry(text.clone()).or_insert(0) += 1;
        }

        let count = self
            .stacktraces
            .entry(record.stack_signature())
            .or_insert(0);
        *count += 1;
        *count > 1
    }

    /// Get-or-zero read of a message counter.
    pub fn message_count(&self, key: &str) -> u64 {
        self.messages.get(key).copied().unwrap_or(0)
    }

    /// Get-or-zero read of a stack-signature counter.
    pub fn stacktrace_count(&self, key: &str) -> u64 {
        self.stacktraces.get(key).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{build_record, RuleSet};
    use crate::stream::TracebackUnit;

    fn record(body: &[&str], log_message: Option<&str>) -> TraceRecord {
        build_record(
            TracebackUnit {
                body_lines: body.iter().map(|l| l.to_string()).collect(),
                log_message: log_message.map(str::to_owned),
            },
            &RuleSet::default(),
        )
    }

    const BODY: &[&str] = &[
        "Traceback (most recent call last):",
        "  File \"a.py\", line 1, in foo",
        "ValueError: boom",
    ];

    #[test]
    fn test_first_occurrence_is_not_a_repeat() {
        let mut counts = AggregateCounts::new();
        assert!(!counts.observe(&record(BODY, None)));
        assert_eq!(counts.stacktrace_count("foo"), 1);
        assert_eq!(counts.message_count("ValueError: boom"), 1);
    }

    #[test]
    fn test_second_occurrence_is_a_repeat() {
        let mut counts = AggregateCounts::new();
        counts.observe(&record(BODY, None));
        assert!(counts.observe(&record(BODY, None)));
        assert_eq!(counts.stacktrace_count("foo"), 2);
    }

    #[test]
    fn test_error_message_counted_separately_from_failure_text() {
        let mut counts = AggregateCounts::new();
        counts.observe(&record(BODY, Some("[worker] request failed")));
        assert_eq!(counts.message_count("ValueError: boom"), 1);
        assert_eq!(counts.message_count("request failed"), 1);
    }

    #[test]
    fn test_get_or_zero() {
        let counts = AggregateCounts::new();
        assert_eq!(counts.message_count("never seen"), 0);
        assert_eq!(counts.stacktrace_count("never seen"), 0);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut counts = AggregateCounts::new();
        counts.observe(&record(BODY, None));
        assert_eq!(counts.message_count("valueerror: boom"), 0);
    }
}
