//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "applica",
    version,
    about = "Autofill job application forms from a profile record",
    long_about = "Autofill job application forms from a profile record.\n\n\
                  Runs the heuristic field matcher against a saved HTML page and \
                  reports which controls received which profile answers."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the emitting module in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,

    /// Include profile values in log output.
    ///
    /// Profile answers are personal data and are redacted unless this is set.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fill a saved application page with a profile record.
    Fill(FillArgs),

    /// List the controls of a page that could receive profile data.
    Inspect(InspectArgs),

    /// Print the alias table used to recognize each field.
    Matchers,
}

#[derive(Parser)]
pub struct FillArgs {
    /// Saved HTML page containing the application form.
    #[arg(value_name = "PAGE")]
    pub page: PathBuf,

    /// JSON file with the profile: a bare `form_data` object or a response
    /// carrying a `form_data` member.
    #[arg(long = "profile", short = 'p', value_name = "JSON")]
    pub profile: PathBuf,

    /// How to print the result.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Write a JSON report with the final control states to this path.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Do not derive first and last name from `full_name`.
    #[arg(long = "no-split-names")]
    pub no_split_names: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Saved HTML page containing the application form.
    #[arg(value_name = "PAGE")]
    pub page: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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
