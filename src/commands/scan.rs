//! Scan command implementation.
//!
//! The scan command:
//! 1. Loads and compiles the rules file, if any
//! 2. Acquires the input stream (file or stdin)
//! 3. Pumps the extraction engine
//! 4. Optionally prints occurrence statistics

use super::models::ScanArgs;
use crate::aggregator::AggregateCounts;
use crate::analyzer::RuleSet;
use crate::engine::process_stream;
use crate::utils::config::{OutputFormat, RunConfig};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::time::Instant;

/// Validate scan arguments before any input is consumed
///
/// **Public** - called from main.rs before execute_scan
pub fn validate_args(args: &ScanArgs) -> Result<()> {
    if let Some(path) = &args.input {
        if !path.exists() {
            bail!("Input file not found: {}", path.display());
        }
    }
    if let Some(path) = &args.rules {
        if !path.exists() {
            bail!("Rules file not found: {}", path.display());
        }
    }
    Ok(())
}

/// Execute the scan command
///
/// **Public** - main entry point called from main.rs
pub fn execute_scan(args: ScanArgs) -> Result<()> {
    let start_time = Instant::now();

    let rules = match &args.rules {
        Some(path) => RuleSet::from_json_file(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        None => RuleSet::default(),
    };

    let config = RunConfig {
        output_format: args.format,
        include_duplicates: args.include_duplicates,
        include_raw: args.include_raw,
    };

    match &args.input {
        Some(path) => info!("Scanning {}", path.display()),
        None => info!("Scanning stdin"),
    }

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let counts = process_stream(input, output, &config, &rules).context("Scan failed")?;

    debug!(
        "Scan finished in {:.1?}: {} distinct stacks, {} distinct messages",
        start_time.elapsed(),
        counts.stacktraces.len(),
        counts.messages.len()
    );

    if args.print_summary {
        print_summary(&counts, args.format);
    }

    Ok(())
}

/// Print occurrence statistics over the whole run, suppressed duplicates
/// included.
///
/// Text reports get the summary on stdout, after the blocks. A JSON report
/// on stdout must stay machine-parseable, so its summary goes to stderr.
fn print_summary(counts: &AggregateCounts, format: OutputFormat) {
    let mut out: Box<dyn Write> = match format {
        OutputFormat::Text => Box::new(io::stdout().lock()),
        OutputFormat::Json => Box::new(io::stderr().lock()),
    };

    // Writes to the standard streams; failures here are not worth aborting
    // a finished scan.
    let _ = write_summary(&mut out, counts);
}

fn write_summary(out: &mut dyn Write, counts: &AggregateCounts) -> io::Result<()> {
    writeln!(out, "Scan summary (generated {})", Utc::now().to_rfc3339())?;

    writeln!(out, "Stack signatures:")?;
    for (signature, count) in sorted_descending(&counts.stacktraces) {
        writeln!(out, "  {:>6}  {}", count, signature)?;
    }

    writeln!(out, "Messages:")?;
    for (message, count) in sorted_descending(&counts.messages) {
        writeln!(out, "  {:>6}  {}", count, message)?;
    }

    Ok(())
}

/// Highest count first; ties break on key so runs stay deterministic.
fn sorted_descending(map: &std::collections::HashMap<String, u64>) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_missing_input() {
        let args = ScanArgs {
            input: Some("/no/such/file.log".into()),
            ..ScanArgs::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_defaults_ok() {
        assert!(validate_args(&ScanArgs::default()).is_ok());
    }

    #[test]
    fn test_sorted_descending_breaks_ties_on_key() {
        let mut map = std::collections::HashMap::new();
        map.insert("b".to_string(), 2u64);
        map.insert("a".to_string(), 2u64);
        map.insert("c".to_string(), 5u64);

        let sorted = sorted_descending(&map);
        assert_eq!(sorted, vec![("c", 5), ("a", 2), ("b", 2)]);
    }

    #[test]
    fn test_write_summary_lists_counters() {
        let mut counts = AggregateCounts::new();
        counts.stacktraces.insert("foo, bar".to_string(), 3);
        counts.messages.insert("ValueError: boom".to_string(), 3);

        let mut buf = Vec::new();
        write_summary(&mut buf, &counts).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("foo, bar"));
        assert!(text.contains("ValueError: boom"));
        assert!(text.contains("     3  "));
    }
}
