//! Record construction and the cleanup/annotation hook passes.

pub mod record;
pub mod rules;

// Re-export main types
pub use record::{build_record, TraceRecord};
pub use rules::{AnnotationRule, CleanupRule, RuleSet, RuleSpec};
