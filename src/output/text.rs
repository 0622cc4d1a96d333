//! Human-readable report blocks.

use crate::analyzer::TraceRecord;
use crate::utils::error::EmitError;
use std::io::Write;

/// Writes one block per failure: error message and failure text when
/// present, the stack signature, optionally the verbatim dump, then a
/// blank line.
pub struct TextEmitter<W: Write> {
    writer: W,
}

impl<W: Write> TextEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn emit(&mut self, record: &TraceRecord, include_raw: bool) -> Result<(), EmitError> {
        if let Some(message) = &record.error_message {
            writeln!(self.writer, "{}", message)?;
        }
        if let Some(text) = &record.failure_text {
            writeln!(self.writer, "{}", text)?;
        }
        writeln!(self.writer, "{}", record.stack_signature())?;
        if include_raw {
            writeln!(self.writer, "{}", record.raw_text())?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), EmitError> {
        self.writer.flush()?;
        Ok(())
    }
}
