//! Labor-market lake pipeline CLI.

use clap::{ColorChoice, Parser};
use caged_cli::logging::{LogConfig, LogFormat, init_logging};
use caged_model::LakeConfig;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_all, run_extract, run_inspect, run_transform, run_validate};
use crate::summary::{print_inspection, print_report, print_run_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let config = LakeConfig::resolve(cli.datalake.clone());
    let outcome = match &cli.command {
        Command::Run(args) => run_all(config, args)
            .and_then(|summary| print_run_summary(&summary, args.json)),
        Command::Extract(args) => run_extract(config, args).map(|path| {
            println!("Raw file: {}", path.display());
        }),
        Command::Transform(args) => run_transform(&config, args).map(|path| {
            println!("Dataset: {}", path.display());
        }),
        Command::Validate(args) => run_validate(&config, args).and_then(|report| {
            let dataset = args.dataset.clone().unwrap_or_else(|| config.dataset_root());
            print_report(&dataset, &report, args.json)
        }),
        Command::Inspect(args) => {
            run_inspect(&config, args).and_then(|inspection| print_inspection(&inspection))
        }
    };
    let exit_code = match outcome {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
