//! Command-line arguments for `cfcheck`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cfcheck",
    version,
    about = "CF Checker - Check datasets against the CF metadata conventions",
    long_about = "Check the metadata of one or more datasets against the CF \
                  metadata conventions.\n\n\
                  Datasets are read from their JSON metadata description. \
                  Standard names are checked against the standard name table \
                  (--standard-names, else $CF_STANDARD_NAMES, else ./standard_name.xml)."
)]
pub struct Cli {
    /// Dataset metadata files to check.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Standard name table (XML).
    #[arg(short = 's', long = "standard-names", value_name = "PATH")]
    pub standard_names: Option<PathBuf>,

    /// File of extra units accepted without parsing, separated by blanks.
    #[arg(short = 'u', long = "extra-units", value_name = "PATH")]
    pub extra_units: Option<PathBuf>,

    /// Accepted value of the global `Conventions` attribute (repeatable).
    #[arg(long = "conventions", value_name = "VALUE", default_value = "CF-1.0")]
    pub conventions: Vec<String>,

    /// Write the JSON report here. With several files this is a directory
    /// holding one `<stem>.json` report per dataset.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Console output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Summary and message tables.
    Table,
    /// The classic line-per-message report.
    Plain,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
