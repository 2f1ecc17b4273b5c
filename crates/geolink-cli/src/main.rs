//! `geolink` command-line entry point.

use clap::{ColorChoice, Parser};
use geolink_cli::logging::{LogConfig, init_logging};
use std::io::{self, IsTerminal};

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command};
use crate::commands::{run_inspect, run_match};
use crate::summary::{print_inspect_summary, print_match_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    if let Err(error) = run(cli.command) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Match(args) => print_match_summary(&run_match(&args)?),
        Command::Inspect(args) => print_inspect_summary(&run_inspect(&args)?),
    }
    Ok(())
}

/// `--log-level` wins over `-v`/`-q`; with neither, `RUST_LOG` may override
/// the default warn level.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    let verbosity = cli.verbosity.tracing_level_filter();
    let config = LogConfig::new(verbosity)
        .with_format(cli.log_format.into())
        .with_log_file(cli.log_file.clone())
        .with_ansi(ansi);
    match cli.log_level {
        Some(level) => config.with_explicit_level(level.into()),
        None if cli.verbosity.is_present() => config.with_explicit_level(verbosity),
        None => config,
    }
}
