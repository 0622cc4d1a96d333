//! One-pass extraction pipeline.
//!
//! Wires classifier, segmenter, record builder, counters, and emitter for a
//! single run: input lines in, deduplicated report out, counters returned.
//! Fully synchronous; independent runs never share mutable state, so
//! multiple streams can be processed in parallel with independent engine
//! instances sharing one read-only `RuleSet`.

use crate::aggregator::AggregateCounts;
use crate::analyzer::{build_record, RuleSet};
use crate::output::ReportEmitter;
use crate::stream::segment_reader;
use crate::utils::config::RunConfig;
use crate::utils::error::ScanError;
use log::debug;
use std::io::{BufRead, Write};

/// Process one log stream to exhaustion.
///
/// Counters update for every record; suppression only gates emission. The
/// counters are returned regardless of output mode so the caller can build
/// summary statistics covering suppressed duplicates. Read and write
/// failures abort the run and propagate unmodified; there are no retries.
pub fn process_stream<R: BufRead, W: Write>(
    input: R,
    output: W,
    config: &RunConfig,
    rules: &RuleSet,
) -> Result<AggregateCounts, ScanError> {
    let mut counts = AggregateCounts::new();
    let mut emitter = ReportEmitter::new(output, config.output_format);

    emitter.begin()?;

    for unit in segment_reader(input) {
        let record = build_record(unit?, rules);
        let repeat = counts.observe(&record);

        if repeat && !config.include_duplicates {
            debug!("suppressing repeated stack: {}", record.stack_signature());
            continue;
        }

        emitter.emit(&record, config.include_raw)?;
    }

    emitter.finish()?;

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::OutputFormat;
    use std::io::Cursor;

    const LOG: &str = "\
[Tue Jan 01 00:00:01 2019] [error] request failed
Traceback (most recent call last):
  File \"a.py\", line 1, in foo
    bar()
ValueError: boom
";

    fn run(input: &str, config: &RunConfig) -> (String, AggregateCounts) {
        let mut out = Vec::new();
        let counts =
            process_stream(Cursor::new(input), &mut out, config, &RuleSet::default()).unwrap();
        (String::from_utf8(out).unwrap(), counts)
    }

    #[test]
    fn test_single_traceback_text_mode() {
        let (out, counts) = run(LOG, &RunConfig::default());

        assert!(out.contains("[error] request failed"));
        assert!(out.contains("ValueError: boom"));
        assert!(out.contains("foo"));
        assert_eq!(counts.stacktrace_count("foo"), 1);
    }

    #[test]
    fn test_duplicate_suppression_still_counts() {
        let doubled = format!("{}{}", LOG, LOG);
        let (out, counts) = run(&doubled, &RunConfig::default());

        assert_eq!(out.matches("ValueError: boom").count(), 1);
        assert_eq!(counts.stacktrace_count("foo"), 2);
        assert_eq!(counts.message_count("ValueError: boom"), 2);
    }

    #[test]
    fn test_include_duplicates_emits_repeats() {
        let doubled = format!("{}{}", LOG, LOG);
        let config = RunConfig {
            include_duplicates: true,
            ..RunConfig::default()
        };
        let (out, counts) = run(&doubled, &config);

        assert_eq!(out.matches("ValueError: boom").count(), 2);
        assert_eq!(counts.stacktrace_count("foo"), 2);
    }

    #[test]
    fn test_empty_input_json_mode_is_empty_array() {
        let config = RunConfig {
            output_format: OutputFormat::Json,
            ..RunConfig::default()
        };
        let (out, counts) = run("", &config);

        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, serde_json::json!([]));
        assert!(counts.messages.is_empty());
        assert!(counts.stacktraces.is_empty());
    }

    #[test]
    fn test_runs_are_deterministic() {
        let config = RunConfig {
            output_format: OutputFormat::Json,
            include_raw: true,
            ..RunConfig::default()
        };
        let (a, _) = run(LOG, &config);
        let (b, _) = run(LOG, &config);
        assert_eq!(a, b);
    }
}
