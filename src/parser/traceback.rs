//! Frame extraction from a traceback body.
//!
//! Parses the native stack-dump syntax:
//!
//! ```text
//! Traceback (most recent call last):
//!   File "app/views.py", line 42, in dispatch
//!     return handler(request)
//! ValueError: boom
//! ```
//!
//! Header lines are skipped, `File "...", line N, in fn` lines become
//! frames, the indented line after a frame is kept as its source text, and
//! the last remaining unindented line is the failure text.

use crate::utils::config::TRACEBACK_START_PREFIX;
use once_cell::sync::Lazy;
use regex::Regex;

static FRAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*File "([^"]+)", line (\d+), in (.+)$"#).unwrap());

/// One call-stack entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Function name; the only field that feeds the stack signature
    pub function: String,

    /// Source file the frame executes in
    pub file: String,

    /// Line number within the file
    pub line: u32,

    /// Quoted source text, when the dump carries it
    pub source: Option<String>,
}

/// Parse a traceback body into its frames and failure text.
///
/// Tolerant by design: lines that fit no known shape are ignored rather
/// than reported, so a partially garbled dump still yields whatever frames
/// it contains. Chained dumps ("During handling of ...") accumulate frames
/// across sections and keep the final exception line as failure text.
pub fn parse_frames(body_lines: &[String]) -> (Vec<Frame>, Option<String>) {
    let mut frames: Vec<Frame> = Vec::new();
    let mut failure_text = None;

    for line in body_lines {
        if line.starts_with(TRACEBACK_START_PREFIX) {
            continue;
        }
        if let Some(caps) = FRAME_RE.captures(line) {
            frames.push(Frame {
                file: caps[1].to_string(),
                line: caps[2].parse().unwrap_or(0),
                function: caps[3].trim().to_string(),
                source: None,
            });
        } else if line.starts_with(char::is_whitespace) {
            // Indented non-frame line: source text for the frame above it.
            // Only the first one counts; caret markers and similar extras
            // are dropped.
            if let Some(frame) = frames.last_mut() {
                if frame.source.is_none() {
                    frame.source = Some(line.trim().to_string());
                }
            }
        } else {
            failure_text = Some(line.trim_end().to_string());
        }
    }

    (frames, failure_text)
}
