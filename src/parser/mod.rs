//! Line-level parsing: the pattern table, line classification, and frame
//! extraction from traceback bodies.

pub mod classify;
pub mod patterns;
pub mod traceback;

// Re-export main types
pub use classify::RawLine;
pub use patterns::extract_timestamp_message;
pub use traceback::{parse_frames, Frame};
