//! Tracesift
//!
//! Traceback extraction and incident triage for service log streams.
//!
//! Feed it archived or live logs and it reconstructs each embedded failure
//! (timestamp, summary message, call-stack signature) into a deduplicated
//! incident report, without ever attaching a debugger.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install tracesift
//! tracesift scan --input service.log
//! ```

pub mod aggregator;
pub mod analyzer;
pub mod commands;
pub mod engine;
pub mod output;
pub mod parser;
pub mod stream;
pub mod utils;
