//! Tracesift CLI
//!
//! Extracts embedded failure tracebacks from service log streams and emits
//! a deduplicated incident report.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use tracesift::commands::{execute_scan, validate_args, ScanArgs};
use tracesift::utils::config::OutputFormat;

/// Tracesift - traceback extraction and incident triage for log streams
#[derive(Parser, Debug)]
#[command(name = "tracesift")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a log stream and report extracted failures
    Scan {
        /// Input log file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Report destination (writes stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Emit repeated stack signatures instead of suppressing them
        #[arg(long)]
        include_duplicates: bool,

        /// Include verbatim traceback lines in the report
        #[arg(long)]
        include_raw: bool,

        /// JSON file with cleanup/annotation rule tables
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Print occurrence statistics after the report
        #[arg(long)]
        summary: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging. Library chatter stays on stderr, so even verbose runs
    // keep the report parseable.
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Scan {
            input,
            output,
            format,
            include_duplicates,
            include_raw,
            rules,
            summary,
        } => {
            let args = ScanArgs {
                input,
                output,
                format,
                include_duplicates,
                include_raw,
                rules,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            // Execute scan
            execute_scan(args)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Tracesift v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Traceback extraction and incident triage for service log streams.");
}
