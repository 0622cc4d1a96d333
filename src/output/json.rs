//! JSON array report writer.
//!
//! The whole report is one top-level array. Elements stream out as records
//! arrive, so the emitter tracks delimiter state across calls instead of
//! buffering the run: a delimiter goes out before every element after the
//! first. Empty input still produces a valid, bracketed empty array.

use super::schema::{describe, RawRecord};
use crate::analyzer::TraceRecord;
use crate::utils::error::EmitError;
use std::io::Write;

pub struct JsonEmitter<W: Write> {
    writer: W,
    need_delim: bool,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            need_delim: false,
        }
    }

    /// Open the array. Must be called exactly once, before any element.
    pub fn begin(&mut self) -> Result<(), EmitError> {
        writeln!(self.writer, "[")?;
        Ok(())
    }

    /// Write one element, preceded by a delimiter for every element after
    /// the first.
    pub fn emit(&mut self, record: &TraceRecord, include_raw: bool) -> Result<(), EmitError> {
        if self.need_delim {
            writeln!(self.writer, ",")?;
        }

        let description = describe(record);
        let serialized = if include_raw {
            serde_json::to_string(&RawRecord {
                record: description,
                raw: record.raw_text(),
            })?
        } else {
            serde_json::to_string(&description)?
        };
        writeln!(self.writer, "{}", serialized)?;

        self.need_delim = true;
        Ok(())
    }

    /// Close the array. Must be called exactly once, after the last element.
    pub fn finish(&mut self) -> Result<(), EmitError> {
        writeln!(self.writer, "]")?;
        self.writer.flush()?;
        Ok(())
    }
}
