//! CLI entry point for the file cleaning pipeline.

use anyhow::{Result, anyhow};
use chrono::Local;
use clap::{Parser, ValueEnum};
use data_sweeper::{ExportFormat, FileOutcome, FileUpload, SweepConfig, Sweeper};
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// CLI-compatible export format enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliExportFormat {
    /// Comma-delimited text with a header row
    Csv,
    /// Single-sheet Excel workbook
    Excel,
}

impl From<CliExportFormat> for ExportFormat {
    fn from(cli: CliExportFormat) -> Self {
        match cli {
            CliExportFormat::Csv => ExportFormat::Csv,
            CliExportFormat::Excel => ExportFormat::Excel,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Clean and convert tabular files",
    long_about = "Ingest CSV/XLSX files, show missing-value statistics, optionally fill\n\
                  gaps (mean for numeric columns, most frequent value for categorical\n\
                  columns), and export as CSV or Excel.\n\n\
                  EXAMPLES:\n  \
                  # Statistics + conversion to Excel\n  \
                  data-sweeper data.csv --to excel\n\n  \
                  # Fill missing values first\n  \
                  data-sweeper data.csv --clean -o results/\n\n  \
                  # Batch with machine-readable summary\n  \
                  data-sweeper a.csv b.xlsx --json"
)]
struct Args {
    /// Input files to process (.csv or .xlsx)
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Fill missing values before export
    #[arg(long)]
    clean: bool,

    /// Show per-column profiles (type, missing %, unique count) in the summary
    #[arg(long)]
    profile: bool,

    /// Output format for exported files
    #[arg(long, value_enum, default_value = "csv")]
    to: CliExportFormat,

    /// Output directory for exported files
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress the per-file summary (only show errors)
    #[arg(short, long)]
    quiet: bool,

    /// Output a JSON batch summary to stdout instead of human-readable text
    ///
    /// Disables all logging; only the JSON summary is written to stdout.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    // Read every input up front; an unreadable path is reported and the
    // rest of the batch continues, same as any other per-file failure.
    let mut uploads = Vec::new();
    for input in &args.inputs {
        match fs::read(input) {
            Ok(bytes) => uploads.push(FileUpload::new(upload_name(input), bytes)),
            Err(e) => error!("Could not read '{}': {}", input, e),
        }
    }

    if uploads.is_empty() {
        return Err(anyhow!("No readable input files"));
    }

    let config = SweepConfig::builder()
        .impute_missing(args.clean)
        .export_format(args.to.into())
        .build()?;

    let sweeper = Sweeper::builder().config(config).build()?;
    let outcomes = sweeper.process_files(&uploads);

    fs::create_dir_all(&args.output)?;
    let mut exported = 0usize;
    for outcome in &outcomes {
        if let Some(artifact) = &outcome.artifact {
            let path = Path::new(&args.output).join(&artifact.file_name);
            fs::write(&path, &artifact.bytes)?;
            exported += 1;
            info!("Wrote {}", path.display());
        }
    }

    if args.json {
        let summary = serde_json::json!({
            "generated_at": Local::now().to_rfc3339(),
            "output_dir": args.output,
            "exported": exported,
            "files": outcomes,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !args.quiet {
        print_batch_summary(&outcomes, &args.output, args.profile);
    }

    if exported == 0 {
        return Err(anyhow!("No files could be processed"));
    }

    Ok(())
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}

/// The upload name is the file name component of the input path; the
/// extension drives format detection and the exported file name.
fn upload_name(input: &str) -> String {
    Path::new(input)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(input)
        .to_string()
}

/// Print a human-readable summary of the batch.
///
/// Uses `println!` intentionally for user-facing CLI output; unlike
/// logging, this should always be visible regardless of log level.
fn print_batch_summary(outcomes: &[FileOutcome], output_dir: &str, show_profiles: bool) {
    println!();
    println!("{}", "=".repeat(70));
    println!("SWEEP COMPLETE");
    println!("{}", "=".repeat(70));

    for outcome in outcomes {
        println!();
        println!("File: {}", outcome.file_name);
        println!("{}", "-".repeat(40));

        if let Some(err) = &outcome.error {
            println!("  SKIPPED: {}", err);
            continue;
        }

        if let Some(summary) = &outcome.summary {
            println!("  Rows: {}", summary.row_count);
            println!("  Columns: {}", summary.column_count);
            if summary.missing.is_empty() {
                println!("  Missing values: none");
            } else {
                println!("  Missing values:");
                for entry in &summary.missing {
                    println!("    {}: {}", entry.column, entry.count);
                }
            }
        }

        if show_profiles && !outcome.column_profiles.is_empty() {
            println!();
            println!(
                "  {:<20} {:<12} {:<10} {:<10}",
                "Column", "Type", "Missing %", "Unique"
            );
            println!("  {}", "-".repeat(54));
            for col in &outcome.column_profiles {
                println!(
                    "  {:<20} {:<12} {:<10.1} {:<10}",
                    truncate_str(&col.name, 19),
                    col.kind.as_str(),
                    col.null_percentage,
                    col.unique_count
                );
            }
        }

        for action in &outcome.imputation_actions {
            println!("  {}", action);
        }
        for column in &outcome.skipped_columns {
            println!("  ! '{}' left unchanged (entirely missing)", column);
        }

        if let Some(artifact) = &outcome.artifact {
            println!(
                "  Exported: {}/{} ({})",
                output_dir, artifact.file_name, artifact.mime_type
            );
        }
    }

    println!();
    let failures = outcomes.iter().filter(|o| !o.is_success()).count();
    println!(
        "{} file(s) processed, {} skipped",
        outcomes.len() - failures,
        failures
    );
    println!("{}", "=".repeat(70));
}
