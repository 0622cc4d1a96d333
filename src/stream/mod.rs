//! Streaming segmentation of log input into traceback units.

pub mod segmenter;

// Re-export main types
pub use segmenter::{segment_reader, ParseState, TracebackStream, TracebackUnit};
