//! CLI argument definitions for the school matcher.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use geolink_cli::logging::LogFormat;
use geolink_match::SearchStrategy;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "geolink",
    version,
    about = "Impute school scores from the nearest participating school",
    long_about = "Impute missing school scores from the nearest participating school.\n\n\
                  Schools without a score are matched to the closest school with one\n\
                  (planar distance on raw coordinates) and inherit its scores."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Match non-participating schools and write the imputed table.
    Match(MatchArgs),

    /// Load and partition the input without matching.
    Inspect(InspectArgs),
}

/// Column names read from the input table.
#[derive(Args, Clone)]
pub struct ColumnArgs {
    /// Unique school identifier column.
    #[arg(long = "id-column", value_name = "COLUMN", default_value = "cod_mod_anexo")]
    pub id_column: String,

    /// Column holding the x coordinate (longitude).
    #[arg(long = "x-column", value_name = "COLUMN", default_value = "NLONG_IE")]
    pub x_column: String,

    /// Column holding the y coordinate (latitude).
    #[arg(long = "y-column", value_name = "COLUMN", default_value = "NLAT_IE")]
    pub y_column: String,

    /// Rows with a number in this column form the reference set.
    #[arg(
        long = "participation-column",
        value_name = "COLUMN",
        default_value = "ind_lenguaje_ece_prim"
    )]
    pub participation_column: String,

    /// Attribute columns carried on each record (defaults to the score columns).
    #[arg(long = "attribute", value_name = "COLUMN")]
    pub attributes: Vec<String>,

    /// Column used for the population filter.
    #[arg(long = "population-column", value_name = "COLUMN", default_value = "D_NIV_MOD")]
    pub population_column: String,

    /// Value a row must hold in the population column.
    #[arg(long = "population-value", value_name = "VALUE", default_value = "Primaria")]
    pub population_value: String,

    /// Keep every row regardless of the population column.
    #[arg(long = "no-population-filter")]
    pub no_population_filter: bool,
}

#[derive(Parser)]
pub struct MatchArgs {
    /// School table in CSV format.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub columns: ColumnArgs,

    /// Attribute to impute as SOURCE=TARGET (repeatable).
    #[arg(long = "impute", value_name = "SOURCE=TARGET")]
    pub impute: Vec<String>,

    /// Linked CSV path (default: <INPUT stem>_imputado.csv next to INPUT).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write query-to-match segments as GeoJSON.
    #[arg(long = "connectors", value_name = "PATH")]
    pub connectors: Option<PathBuf>,

    /// Also write both school sets as GeoJSON points.
    #[arg(long = "points", value_name = "PATH")]
    pub points: Option<PathBuf>,

    /// Append the matched school id and match distance to the linked CSV.
    #[arg(long = "match-columns")]
    pub match_columns: bool,

    /// Write connector and point coordinates as (y, x).
    #[arg(long = "swap-axes")]
    pub swap_axes: bool,

    /// Nearest search strategy.
    #[arg(long = "strategy", value_enum, default_value = "auto")]
    pub strategy: StrategyArg,

    /// Worker threads for the search (default: available parallelism).
    #[arg(long = "threads", value_name = "N")]
    pub threads: Option<usize>,

    /// Run the pipeline and print the summary without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// School table in CSV format.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub columns: ColumnArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Auto,
    BruteForce,
    Rtree,
}

impl From<StrategyArg> for SearchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::BruteForce => Self::BruteForce,
            StrategyArg::Rtree => Self::RTree,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
