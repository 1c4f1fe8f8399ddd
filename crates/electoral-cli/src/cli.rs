//! CLI argument definitions for the electoral roll checker.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "electoral",
    version,
    about = "Check identity fiches against the electoral roll",
    long_about = "Check identity fiches against the electoral roll.\n\n\
                  Reads a delimited roll file (UTF-8 or legacy 8-bit encodings,\n\
                  semicolon, tab or comma separated) and reports whether a person\n\
                  is already registered."
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

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

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

    /// Include names, birth dates and places in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file (default: ./electoral.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Electoral roll file (overrides the settings file).
    #[arg(long = "reference", value_name = "PATH", global = true)]
    pub reference: Option<PathBuf>,

    /// Give up on a check after this many seconds.
    #[arg(long = "timeout-secs", value_name = "SECS", global = true)]
    pub timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check whether a person already appears in the roll.
    Check(CheckArgs),

    /// Count the entries of the roll.
    Count,

    /// Show how the roll file is decoded, with its first rows.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Family name (maiden name for married women).
    #[arg(long = "family", value_name = "NAME")]
    pub family: String,

    /// Given names.
    #[arg(long = "given", value_name = "NAMES")]
    pub given: String,

    /// Birth date, as DD/MM/YYYY or YYYY-MM-DD.
    #[arg(long = "birth-date", value_name = "DATE")]
    pub birth_date: Option<String>,

    /// Birth place.
    #[arg(long = "birth-place", value_name = "PLACE")]
    pub birth_place: Option<String>,

    /// Voter card number already entered on the fiche.
    #[arg(long = "card-number", value_name = "NUMBER")]
    pub card_number: Option<String>,

    /// Print the report as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Number of leading rows to show.
    #[arg(long = "rows", value_name = "N", default_value_t = 5)]
    pub rows: usize,

    /// Print the preview as JSON.
    #[arg(long = "json")]
    pub json: bool,
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
