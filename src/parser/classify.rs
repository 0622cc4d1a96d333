//! Line classification.
//!
//! Every input line is labeled exactly once, before the segmenter sees it.
//! Classification is a pure function of the line text: no state, same input
//! always yields the same flags.

use super::patterns::extract_timestamp_message;
use crate::utils::config::TRACEBACK_START_PREFIX;

/// One raw input line plus its derived flags.
///
/// Ephemeral: created per line and consumed immediately by the segmenter.
#[derive(Debug, Clone)]
pub struct RawLine {
    /// Line text, without its terminator
    pub text: String,

    /// Line begins a new traceback dump
    pub is_start_marker: bool,

    /// Line is a timestamped/bracketed log message
    pub is_log_message: bool,
}

impl RawLine {
    /// Classify one line.
    ///
    /// The start-marker prefix is checked before anything else; a start
    /// marker is never also a log message. Otherwise the line is a log
    /// message when the pattern table extracts a non-empty timestamp or a
    /// non-empty message from it.
    pub fn classify(text: String) -> Self {
        let is_start_marker = text.starts_with(TRACEBACK_START_PREFIX);
        let mut is_log_message = false;
        if !is_start_marker {
            let (timestamp, message) = extract_timestamp_message(&text);
            is_log_message = timestamp.is_some_and(|t| !t.is_empty())
                || message.is_some_and(|m| !m.is_empty());
        }
        Self {
            text,
            is_start_marker,
            is_log_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_marker() {
        let line = RawLine::classify("Traceback (most recent call last):".to_string());
        assert!(line.is_start_marker);
        assert!(!line.is_log_message);
    }

    #[test]
    fn test_log_message() {
        let line = RawLine::classify("[worker-3] restarting".to_string());
        assert!(!line.is_start_marker);
        assert!(line.is_log_message);
    }

    #[test]
    fn test_bracketed_line_without_message_is_not_a_log_message() {
        // The default rule matches but extracts neither a timestamp nor any
        // message text, so the line stays plain.
        let line = RawLine::classify("[worker-3]".to_string());
        assert!(!line.is_log_message);
    }

    #[test]
    fn test_plain_line() {
        let line = RawLine::classify("ValueError: boom".to_string());
        assert!(!line.is_start_marker);
        assert!(!line.is_log_message);
    }

    #[test]
    fn test_classification_is_pure() {
        let a = RawLine::classify("2019-03-02 11:22:33 svc ERROR died".to_string());
        let b = RawLine::classify("2019-03-02 11:22:33 svc ERROR died".to_string());
        assert_eq!(a.is_start_marker, b.is_start_marker);
        assert_eq!(a.is_log_message, b.is_log_message);
    }
}
