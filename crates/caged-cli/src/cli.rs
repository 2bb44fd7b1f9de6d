//! CLI argument definitions for the lake pipeline runner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

use caged_model::config::{DATALAKE_PATH_ENV, DEFAULT_RECORD_COUNT, DEFAULT_SEED};

#[derive(Parser)]
#[command(
    name = "caged",
    version,
    about = "Labor-market lake pipeline - generate, curate, and validate movement records",
    long_about = "Generate synthetic labor-market movement records into the bronze tier,\n\
                  curate them into a region-partitioned Parquet dataset in the silver tier,\n\
                  and validate the result with a quality report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Lake base directory (default: <HOME>/airflow/datalake).
    #[arg(long = "datalake", value_name = "DIR", env = DATALAKE_PATH_ENV, global = true)]
    pub datalake: Option<PathBuf>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

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
}

#[derive(Subcommand)]
pub enum Command {
    /// Run extract, transform, and validate in sequence.
    Run(RunArgs),

    /// Generate the raw staging CSV in the bronze tier.
    Extract(GenerateArgs),

    /// Curate a staging CSV into the partitioned silver dataset.
    Transform(TransformArgs),

    /// Run the quality gate against a curated dataset.
    Validate(ValidateArgs),

    /// Print rows and wage figures from a curated dataset.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Number of records to generate.
    #[arg(long = "records", value_name = "N", default_value_t = DEFAULT_RECORD_COUNT)]
    pub records: usize,

    /// Seed for the record generator.
    #[arg(long = "seed", default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

#[derive(Parser)]
pub struct RunArgs {
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Extra attempts per failed stage.
    #[arg(long = "retries", default_value_t = 2)]
    pub retries: u32,

    /// Seconds to wait between attempts of a failed stage.
    #[arg(long = "retry-delay-secs", value_name = "SECS", default_value_t = 300)]
    pub retry_delay_secs: u64,

    /// Print the quality report as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct TransformArgs {
    /// Staging CSV to curate (default: the bronze tier's staging file).
    #[arg(long = "input", value_name = "CSV")]
    pub input: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Dataset root to check (default: the silver tier's dataset).
    #[arg(long = "dataset", value_name = "DIR")]
    pub dataset: Option<PathBuf>,

    /// Print the quality report as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Dataset root to read (default: the silver tier's dataset).
    #[arg(long = "dataset", value_name = "DIR")]
    pub dataset: Option<PathBuf>,

    /// Only read the partition for this region code (e.g. SP).
    #[arg(long = "region", value_name = "CODE")]
    pub region: Option<String>,

    /// Number of randomly drawn rows to show.
    #[arg(long = "sample", value_name = "N", default_value_t = 3)]
    pub sample: usize,

    /// Seed for drawing the sample rows.
    #[arg(long = "seed", default_value_t = DEFAULT_SEED)]
    pub seed: u64,
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
