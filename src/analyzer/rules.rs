//! Caller-supplied cleanup and annotation rule tables.
//!
//! The tables are opaque external configuration: which patterns a given
//! service needs lives outside this crate, typically in a JSON rules file.
//! The core only guarantees ordering and that cleanup runs before
//! annotation on every record.

use super::record::TraceRecord;
use crate::utils::error::RuleError;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Regex rewrite applied to the record's text fields.
///
/// Cleanup strips run-specific detail (addresses, request ids, pids) so
/// recurring failures collapse to identical text and share one counter key.
#[derive(Debug, Clone)]
pub struct CleanupRule {
    pattern: Regex,
    replacement: String,
}

impl CleanupRule {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, RuleError> {
        let pattern = compile(pattern)?;
        Ok(Self {
            pattern,
            replacement: replacement.into(),
        })
    }

    fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }
}

/// Pattern-keyed note attached to matching records.
///
/// The pattern is tried against the stack signature, the failure text, and
/// the error message; any hit attaches the note.
#[derive(Debug, Clone)]
pub struct AnnotationRule {
    pattern: Regex,
    note: String,
}

impl AnnotationRule {
    pub fn new(pattern: &str, note: impl Into<String>) -> Result<Self, RuleError> {
        let pattern = compile(pattern)?;
        Ok(Self {
            pattern,
            note: note.into(),
        })
    }

    fn matches(&self, record: &TraceRecord, signature: &str) -> bool {
        self.pattern.is_match(signature)
            || record
                .failure_text
                .as_deref()
                .is_some_and(|t| self.pattern.is_match(t))
            || record
                .error_message
                .as_deref()
                .is_some_and(|t| self.pattern.is_match(t))
    }
}

fn compile(pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Compiled hook tables for one run. Read-only during processing, so one
/// instance is safely shared across concurrent runs.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub cleanups: Vec<CleanupRule>,
    pub annotations: Vec<AnnotationRule>,
}

impl RuleSet {
    /// Rewrite the record's text fields, one rule after another in table
    /// order.
    pub fn cleanup(&self, record: &mut TraceRecord) {
        for rule in &self.cleanups {
            if let Some(text) = record.failure_text.as_deref() {
                record.failure_text = Some(rule.apply(text));
            }
            if let Some(text) = record.error_message.as_deref() {
                record.error_message = Some(rule.apply(text));
            }
        }
    }

    /// Attach notes for every matching annotation rule, in table order.
    pub fn annotate(&self, record: &mut TraceRecord) {
        let signature = record.stack_signature();
        for rule in &self.annotations {
            if rule.matches(record, &signature) {
                record.annotations.push(rule.note.clone());
            }
        }
    }

    /// Compile a deserialized rules document.
    pub fn from_spec(spec: &RuleSpec) -> Result<Self, RuleError> {
        let cleanups = spec
            .cleanups
            .iter()
            .map(|c| CleanupRule::new(&c.pattern, c.replacement.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        let annotations = spec
            .annotations
            .iter()
            .map(|a| AnnotationRule::new(&a.pattern, a.note.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            cleanups,
            annotations,
        })
    }

    /// Load and compile a JSON rules file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RuleError> {
        let path = path.as_ref();
        debug!("Loading rules from: {}", path.display());
        let file = File::open(path)?;
        let spec: RuleSpec = serde_json::from_reader(BufReader::new(file))?;
        let rules = Self::from_spec(&spec)?;
        debug!(
            "Compiled {} cleanup and {} annotation rules",
            rules.cleanups.len(),
            rules.annotations.len()
        );
        Ok(rules)
    }
}

/// On-disk rules document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSpec {
    #[serde(default)]
    pub cleanups: Vec<CleanupSpec>,

    #[serde(default)]
    pub annotations: Vec<AnnotationSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupSpec {
    pub pattern: String,
    pub replacement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationSpec {
    pub pattern: String,
    pub note: String,
}
