//! CLI argument definitions for labflag.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use lab_model::Sex;

#[derive(Parser)]
#[command(
    name = "labflag",
    version,
    about = "Lab result flagging - classify entered results against reference ranges",
    long_about = "Classify entered lab results against reference ranges.\n\n\
                  Evaluates a results file against a built-in panel or a custom\n\
                  template, applies demographic reference ranges, and writes the\n\
                  flagged test record as JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow entered patient values in trace logs.
    ///
    /// Off by default: entered values are protected health information and
    /// are replaced with a redaction token in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate a results file and write the flagged test record.
    Evaluate(EvaluateArgs),

    /// List the built-in panels and their parameters.
    Panels,

    /// Check the standards installation against its manifest.
    Doctor(DoctorArgs),
}

#[derive(Parser)]
pub struct EvaluateArgs {
    /// Results CSV file (Parameter, Value, optional override columns).
    #[arg(value_name = "RESULTS_FILE")]
    pub results_file: PathBuf,

    /// Built-in panel code to evaluate against (e.g. CBC).
    #[arg(long = "panel", value_name = "CODE", required_unless_present = "template")]
    pub panel: Option<String>,

    /// Custom template JSON to evaluate against instead of a built-in panel.
    #[arg(long = "template", value_name = "FILE", conflicts_with = "panel")]
    pub template: Option<PathBuf>,

    /// Patient identifier recorded in the saved test record.
    #[arg(long = "patient-id", value_name = "ID")]
    pub patient_id: Option<String>,

    /// Patient sex for demographic reference ranges (M or F).
    #[arg(long = "sex", value_name = "SEX")]
    pub sex: Option<Sex>,

    /// Patient age in whole years for demographic reference ranges.
    #[arg(long = "age", value_name = "YEARS")]
    pub age: Option<u32>,

    /// Output directory for the test record (default: <RESULTS_FILE dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Evaluate and report without writing the test record.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Skip demographic reference-range substitution.
    #[arg(long = "no-demographics")]
    pub no_demographics: bool,
}

#[derive(Parser)]
pub struct DoctorArgs {
    /// Standards directory to check (default: LAB_STANDARDS_DIR or the
    /// bundled standards/ directory).
    #[arg(long = "standards-dir", value_name = "DIR")]
    pub standards_dir: Option<PathBuf>,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
