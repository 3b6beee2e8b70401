//! Pulse CLI - Command-line interface for mailpulse
//!
//! Commands:
//! - plot: Render the four-series interaction chart in the terminal
//! - series: Print one interaction type's daily and smoothed rates
//! - validate: Schema-check a campaign log

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use mailpulse::plot::TerminalRenderer;
use mailpulse::schema::RecordAdapter;
use mailpulse::types::{Interaction, Record, Table};
use mailpulse::{AnalysisError, VERSION};

/// Pulse - campaign interaction analytics in the terminal
#[derive(Parser)]
#[command(name = "pulse")]
#[command(version = VERSION)]
#[command(about = "Plot email-campaign interaction rates over time", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the four-series interaction chart in the terminal
    Plot {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "csv")]
        format: InputFormat,

        /// Moving-average window in days
        #[arg(short, long, default_value = "7")]
        window: usize,

        /// Chart width in braille dots
        #[arg(long, default_value = "180")]
        width: u32,

        /// Chart height in braille dots
        #[arg(long, default_value = "60")]
        height: u32,
    },

    /// Print one interaction type's daily and smoothed rates
    Series {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "csv")]
        format: InputFormat,

        /// Interaction type: Opened, Error, Clicked, Unsubscribed
        #[arg(long)]
        interaction: String,

        /// Moving-average window in days
        #[arg(short, long, default_value = "7")]
        window: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Schema-check a campaign log
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "csv")]
        format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// CSV with a date,status header
    Csv,
    /// Newline-delimited JSON (one record per line)
    Ndjson,
    /// JSON array of records
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), PulseCliError> {
    match cli.command {
        Commands::Plot {
            input,
            format,
            window,
            width,
            height,
        } => cmd_plot(&input, format, window, width, height),

        Commands::Series {
            input,
            format,
            interaction,
            window,
            json,
        } => cmd_series(&input, format, &interaction, window, json),

        Commands::Validate {
            input,
            format,
            json,
        } => cmd_validate(&input, format, json),
    }
}

fn cmd_plot(
    input: &Path,
    format: InputFormat,
    window: usize,
    width: u32,
    height: u32,
) -> Result<(), PulseCliError> {
    let table = load_table(input, format)?;
    let mut renderer = TerminalRenderer::new(width, height);
    mailpulse::plot_interactions(table, window, &mut renderer)?;
    Ok(())
}

fn cmd_series(
    input: &Path,
    format: InputFormat,
    interaction: &str,
    window: usize,
    json: bool,
) -> Result<(), PulseCliError> {
    let interaction: Interaction = interaction.parse()?;
    let table = load_table(input, format)?;

    let daily = mailpulse::daily_rates(table.clone(), interaction)?;
    let smoothed = mailpulse::interaction_series(table, interaction, window)?;

    let report = SeriesReport {
        interaction: interaction.to_string(),
        window,
        days: daily.days().iter().map(|d| d.to_string()).collect(),
        rates: daily.rates(),
        smoothed,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} rate, {}-day moving average", report.interaction, window);
        for ((day, rate), smooth) in report
            .days
            .iter()
            .zip(&report.rates)
            .zip(&report.smoothed)
        {
            println!("  {}  raw {:.4}  smoothed {:.4}", day, rate, smooth);
        }
    }

    Ok(())
}

fn cmd_validate(input: &Path, format: InputFormat, json: bool) -> Result<(), PulseCliError> {
    let records = load_records(input, format)?;
    let issues = RecordAdapter::validate_records(&records);

    let report = ValidationReport {
        total_records: records.len(),
        valid_records: records.len() - issues.len(),
        invalid_records: issues.len(),
        errors: issues
            .iter()
            .map(|issue| ValidationErrorDetail {
                index: issue.index,
                error: issue.error.to_string(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records:   {}", report.total_records);
        println!("Valid records:   {}", report.valid_records);
        println!("Invalid records: {}", report.invalid_records);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - Record {}: {}", err.index, err.error);
            }
        }
    }

    if report.invalid_records > 0 {
        Err(PulseCliError::ValidationFailed(report.invalid_records))
    } else {
        Ok(())
    }
}

// Helper functions

fn load_records(input: &Path, format: InputFormat) -> Result<Vec<Record>, PulseCliError> {
    let data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let records = match format {
        InputFormat::Csv => RecordAdapter::parse_csv(&data)?,
        InputFormat::Ndjson => RecordAdapter::parse_ndjson(&data)?,
        InputFormat::Json => RecordAdapter::parse_array(&data)?,
    };

    if records.is_empty() {
        return Err(PulseCliError::NoRecords);
    }

    Ok(records)
}

fn load_table(input: &Path, format: InputFormat) -> Result<Table, PulseCliError> {
    Ok(Table::new(load_records(input, format)?))
}

// Error types

#[derive(Debug)]
enum PulseCliError {
    Io(io::Error),
    Analysis(AnalysisError),
    Json(serde_json::Error),
    NoRecords,
    ValidationFailed(usize),
}

impl From<io::Error> for PulseCliError {
    fn from(e: io::Error) -> Self {
        PulseCliError::Io(e)
    }
}

impl From<AnalysisError> for PulseCliError {
    fn from(e: AnalysisError) -> Self {
        PulseCliError::Analysis(e)
    }
}

impl From<serde_json::Error> for PulseCliError {
    fn from(e: serde_json::Error) -> Self {
        PulseCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<PulseCliError> for CliError {
    fn from(e: PulseCliError) -> Self {
        match e {
            PulseCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            PulseCliError::Analysis(e) => CliError {
                code: "ANALYSIS_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'pulse validate' to inspect the log".to_string()),
            },
            PulseCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            PulseCliError::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "No records found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            PulseCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} records failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct SeriesReport {
    interaction: String,
    window: usize,
    days: Vec<String>,
    rates: Vec<f64>,
    smoothed: Vec<f64>,
}

#[derive(serde::Serialize)]
struct ValidationReport {
    total_records: usize,
    valid_records: usize,
    invalid_records: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    error: String,
}
