//! Heuristic timestamp/message extraction rules.
//!
//! Service logs mix several line formats in a single stream. The table below
//! maps each known format to capture positions for (timestamp, message).
//! Rules are evaluated strictly in declaration order and the first full-line
//! match wins; deterministic priority avoids ambiguity without cross-rule
//! backtracking. A line matching no rule yields (None, None).

use once_cell::sync::Lazy;
use regex::Regex;

const LOG_LEVELS: &str = "(CRITICAL|ERROR|WARNING|INFO|DEBUG)";

/// `[<token>] LEVEL [<token2>] <message>`
static RULE_BRACKETED_LEVEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^\[([^\]]+)\] {LOG_LEVELS} \[[^\]]+\] (.*)$")).unwrap()
});

/// `YYYY-MM-DD HH:MM:SS ... LEVEL <message>`
static RULE_ISO_LEVEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(\d\d\d\d-\d\d-\d\d \d\d:\d\d:\d\d).*{LOG_LEVELS} +(.*)$"
    ))
    .unwrap()
});

/// `YYYY-MM-DD HH:MM:SS ...[LEVEL] <message>`
static RULE_ISO_BRACKETED_LEVEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(\d\d\d\d-\d\d-\d\d \d\d:\d\d:\d\d) .*\[{LOG_LEVELS}\] +(.*)$"
    ))
    .unwrap()
});

/// `...[Mon Mon DD HH:MM:SS YYYY] <message>` (locale-style date)
static RULE_LOCALE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.*\[([A-Z][a-z][a-z] [A-Z][a-z][a-z] \d\d \d\d:\d\d:\d\d \d\d\d\d)\] +(.*)$")
        .unwrap()
});

/// `[<anything>] <message>` fallback with no usable timestamp
static RULE_DEFAULT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[[^\]]+\] *(.*)$").unwrap());

/// One entry of the extraction table: a pattern plus the capture positions
/// that hold the timestamp and the message.
struct MessageRule {
    regex: &'static Lazy<Regex>,
    timestamp_group: Option<usize>,
    message_group: usize,
}

/// Most-specific first; the default rule must stay last.
static MESSAGE_RULES: &[MessageRule] = &[
    MessageRule {
        regex: &RULE_BRACKETED_LEVEL,
        timestamp_group: Some(1),
        message_group: 3,
    },
    MessageRule {
        regex: &RULE_ISO_LEVEL,
        timestamp_group: Some(1),
        message_group: 3,
    },
    MessageRule {
        regex: &RULE_ISO_BRACKETED_LEVEL,
        timestamp_group: Some(1),
        message_group: 3,
    },
    MessageRule {
        regex: &RULE_LOCALE_DATE,
        timestamp_group: Some(1),
        message_group: 2,
    },
    MessageRule {
        regex: &RULE_DEFAULT,
        timestamp_group: None,
        message_group: 1,
    },
];

/// Extract (timestamp, message) from one log line.
///
/// `line` must not carry its terminator. The returned slices borrow from
/// `line`. The default rule deliberately reports a `None` timestamp: a
/// bracket-prefixed line with no recognizable date still counts as a log
/// message, it just cannot date the next traceback.
pub fn extract_timestamp_message(line: &str) -> (Option<&str>, Option<&str>) {
    for rule in MESSAGE_RULES {
        if let Some(caps) = rule.regex.captures(line) {
            let timestamp = rule
                .timestamp_group
                .and_then(|group| caps.get(group))
                .map(|m| m.as_str());
            let message = caps.get(rule.message_group).map(|m| m.as_str());
            return (timestamp, message);
        }
    }
    (None, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracketed_level_rule() {
        let (ts, msg) = extract_timestamp_message(
            "[2019-01-01 00:00:01,123] ERROR [django.request] Internal Server Error: /",
        );
        assert_eq!(ts, Some("2019-01-01 00:00:01,123"));
        assert_eq!(msg, Some("Internal Server Error: /"));
    }

    #[test]
    fn test_iso_level_rule() {
        let (ts, msg) =
            extract_timestamp_message("2019-03-02 11:22:33 myservice ERROR worker died");
        assert_eq!(ts, Some("2019-03-02 11:22:33"));
        assert_eq!(msg, Some("worker died"));
    }

    #[test]
    fn test_iso_bracketed_level_rule() {
        let (ts, msg) =
            extract_timestamp_message("2019-03-02 11:22:33 myservice [ERROR]  worker died");
        assert_eq!(ts, Some("2019-03-02 11:22:33"));
        assert_eq!(msg, Some("worker died"));
    }

    #[test]
    fn test_locale_date_rule() {
        let (ts, msg) =
            extract_timestamp_message("[Tue Jan 01 00:00:01 2019] [error] request failed");
        assert_eq!(ts, Some("Tue Jan 01 00:00:01 2019"));
        assert_eq!(msg, Some("[error] request failed"));
    }

    #[test]
    fn test_default_rule_has_no_timestamp() {
        let (ts, msg) = extract_timestamp_message("[worker-3] restarting");
        assert_eq!(ts, None);
        assert_eq!(msg, Some("restarting"));
    }

    #[test]
    fn test_unmatched_line() {
        let (ts, msg) = extract_timestamp_message("  File \"a.py\", line 1, in foo");
        assert_eq!(ts, None);
        assert_eq!(msg, None);
    }

    #[test]
    fn test_rule_precedence_over_default() {
        // Matches both the bracketed-level rule and the default rule; the
        // more specific rule is declared first and must win.
        let (ts, msg) =
            extract_timestamp_message("[ts-1] CRITICAL [mod] out of memory");
        assert_eq!(ts, Some("ts-1"));
        assert_eq!(msg, Some("out of memory"));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let line = "2019-03-02 11:22:33 svc INFO started";
        assert_eq!(
            extract_timestamp_message(line),
            extract_timestamp_message(line)
        );
    }
}
