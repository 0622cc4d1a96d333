//! Single-pass traceback segmentation.
//!
//! The segmenter consumes classified lines and yields completed traceback
//! units. It is a two-state machine (idle / in-traceback) with one extra
//! piece of carried context: the most recently seen log-message line, which
//! becomes the likely timestamp source for the next unit.
//!
//! Flush triggers:
//! - a start marker while already inside a traceback (back-to-back dumps),
//! - a log-message line while inside a traceback with a non-empty body,
//! - end of stream while inside a traceback.

use crate::parser::RawLine;
use log::debug;
use std::io;

/// One completed traceback unit, as flushed by the segmenter.
#[derive(Debug, Clone)]
pub struct TracebackUnit {
    /// Body lines, in input order, interleaved log lines filtered out
    pub body_lines: Vec<String>,

    /// The log-message line that preceded this traceback, if any
    pub log_message: Option<String>,
}

/// Segmentation state. Exactly one live instance per run; every flush
/// replaces it wholesale rather than patching it in place.
#[derive(Debug, Default)]
pub struct ParseState {
    in_traceback: bool,
    body_lines: Vec<String>,
    log_message: Option<String>,
}

impl ParseState {
    pub fn is_in_traceback(&self) -> bool {
        self.in_traceback
    }

    /// Consume one classified line, returning the successor state and the
    /// unit flushed by this transition, if any.
    ///
    /// `pending_log_message` is the carried context owned by the caller; it
    /// survives every reset so a unit can be seeded with the log line that
    /// preceded it.
    pub fn advance(
        mut self,
        line: &RawLine,
        pending_log_message: Option<&str>,
    ) -> (ParseState, Option<TracebackUnit>) {
        let mut flushed = None;

        if line.is_start_marker {
            if self.in_traceback {
                flushed = Some(std::mem::take(&mut self).into_unit());
            }
            self.in_traceback = true;
            self.log_message = pending_log_message.map(str::to_owned);
        } else if line.is_log_message && !self.body_lines.is_empty() {
            flushed = Some(std::mem::take(&mut self).into_unit());
        }

        // Append filter: bracket-prefixed and empty lines are interleaved
        // noise, never traceback body. Start markers pass because the check
        // above already ran.
        if self.in_traceback && !(line.text.starts_with('[') || line.text.is_empty()) {
            self.body_lines.push(line.text.clone());
        }

        (self, flushed)
    }

    fn into_unit(self) -> TracebackUnit {
        TracebackUnit {
            body_lines: self.body_lines,
            log_message: self.log_message,
        }
    }
}

/// Lazy, pull-based segmenter over any fallible line source.
///
/// Single forward pass; not restartable except by re-reading the stream
/// from its origin. Read errors are yielded through unmodified.
pub struct TracebackStream<I> {
    lines: I,
    state: ParseState,
    pending_log_message: Option<String>,
    finished: bool,
}

impl<I> TracebackStream<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            state: ParseState::default(),
            pending_log_message: None,
            finished: false,
        }
    }
}

/// Segment a buffered reader into traceback units.
pub fn segment_reader<R: io::BufRead>(reader: R) -> TracebackStream<io::Lines<R>> {
    TracebackStream::new(reader.lines())
}

impl<I> Iterator for TracebackStream<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = io::Result<TracebackUnit>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.lines.next() {
                Some(Ok(text)) => {
                    let line = RawLine::classify(text);
                    let (state, flushed) = std::mem::take(&mut self.state)
                        .advance(&line, self.pending_log_message.as_deref());
                    self.state = state;
                    if line.is_log_message {
                        self.pending_log_message = Some(line.text);
                    }
                    if let Some(unit) = flushed {
                        debug!("flushed unit with {} body lines", unit.body_lines.len());
                        return Some(Ok(unit));
                    }
                }
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    self.finished = true;
                    let state = std::mem::take(&mut self.state);
                    if state.is_in_traceback() {
                        // Final flush; the body may legitimately be empty if
                        // the stream ended right at a start marker.
                        return Some(Ok(state.into_unit()));
                    }
                    return None;
                }
            }
        }
    }
}
