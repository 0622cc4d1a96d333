use crate::utils::config::OutputFormat;
use std::path::PathBuf;

/// Arguments for the scan command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ScanArgs {
    /// Input log file (None = stdin)
    pub input: Option<PathBuf>,

    /// Report destination (None = stdout)
    pub output: Option<PathBuf>,

    /// Report output format
    pub format: OutputFormat,

    /// Emit repeated stack signatures instead of suppressing them
    pub include_duplicates: bool,

    /// Include verbatim traceback lines in the report
    pub include_raw: bool,

    /// JSON file with cleanup/annotation rule tables (None = no rules)
    pub rules: Option<PathBuf>,

    /// Print occurrence statistics after the report
    pub print_summary: bool,
}

impl Default for ScanArgs {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            format: OutputFormat::Text,
            include_duplicates: false,
            include_raw: false,
            rules: None,
            print_summary: false,
        }
    }
}
