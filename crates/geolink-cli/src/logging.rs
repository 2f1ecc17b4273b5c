//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! Every pipeline stage runs inside a `tracing` span (`ingest`, `match`,
//! `link`, `output`).
//!
//! # Log Levels
//!
//! - `error`: fatal pipeline errors
//! - `warn`: skipped rows, values read as null
//! - `info`: stage progress and summary counts
//! - `debug`: per-stage details (strategy, worker counts)
//! - `trace`: unused
//!
//! # Usage
//!
//! ```ignore
//! use geolink_cli::logging::{init_logging, LogConfig, LogFormat};
//! use tracing::level_filters::LevelFilter;
//!
//! let config = LogConfig::new(LevelFilter::DEBUG).with_format(LogFormat::Json);
//! init_logging(&config)?;
//! ```

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Subscriber settings assembled from the command line.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level applied to the `geolink_*` crates.
    pub level_filter: LevelFilter,
    /// Let a valid `RUST_LOG` replace `level_filter`.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    /// Print module paths next to events.
    pub with_target: bool,
    /// Emit span close events (JSON only).
    pub with_spans: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append to this file instead of writing to stderr.
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(LevelFilter::WARN)
    }
}

impl LogConfig {
    pub fn new(level_filter: LevelFilter) -> Self {
        Self {
            level_filter,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_spans: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }

    /// An explicit level pins the filter and ignores `RUST_LOG`.
    #[must_use]
    pub fn with_explicit_level(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self.use_env_filter = false;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global subscriber, writing to `config.log_file` when set and
/// to stderr otherwise.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            init_logging_with_writer(config, Mutex::new(file));
        }
        None => init_logging_with_writer(config, io::stderr),
    }
    Ok(())
}

/// Installs the global subscriber with a custom writer.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config.level_filter, config.use_env_filter);
    tracing_subscriber::registry()
        .with(fmt_layer(config, writer).with_filter(filter))
        .init();
}

/// The formatting layer for `config.format`. Timestamps and ANSI colours do
/// not apply to JSON output.
fn fmt_layer<W>(config: &LogConfig, writer: W) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let base = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target);
    let span_events = if config.with_spans {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };
    match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => base.json().with_span_events(span_events).boxed(),
        (LogFormat::Compact, true) => base.compact().with_ansi(config.with_ansi).boxed(),
        (LogFormat::Compact, false) => base
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        (LogFormat::Pretty, true) => base.with_ansi(config.with_ansi).boxed(),
        (LogFormat::Pretty, false) => base.with_ansi(config.with_ansi).without_time().boxed(),
    }
}

/// Build an `EnvFilter` for the workspace crates at `level`.
///
/// `RUST_LOG` wins when `use_env` is set and the variable parses.
fn build_env_filter(level: LevelFilter, use_env: bool) -> EnvFilter {
    let level_str = level.to_string().to_lowercase();
    // External crates stay at warn level to reduce noise
    let fallback = || {
        EnvFilter::new(format!(
            "warn,geolink_cli={level},geolink_ingest={level},geolink_match={level},\
             geolink_model={level},geolink_output={level}",
            level = level_str
        ))
    };
    if use_env {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn explicit_level_disables_env_override() {
        let config = LogConfig::default();
        assert!(config.use_env_filter);
        let config = config.with_explicit_level(LevelFilter::TRACE);
        assert_eq!(config.level_filter, LevelFilter::TRACE);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn json_layer_writes_filtered_events() {
        let buffer = Arc::new(Mutex::new(Vec::<u8>::new()));
        let sink = Arc::clone(&buffer);
        let config = LogConfig::new(LevelFilter::INFO).with_format(LogFormat::Json);
        let writer = move || SinkWriter(Arc::clone(&sink));
        let filter = build_env_filter(LevelFilter::INFO, false);
        let subscriber =
            tracing_subscriber::registry().with(fmt_layer(&config, writer).with_filter(filter));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "geolink_match", matched = 2, "matching finished");
            tracing::debug!(target: "geolink_match", "filtered out");
        });
        let text = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(text.contains("\"matched\":2"));
        assert!(!text.contains("filtered out"));
    }

    struct SinkWriter(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SinkWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn explicit_filter_names_workspace_crates() {
        let filter = build_env_filter(LevelFilter::DEBUG, false)
            .to_string()
            .to_lowercase();
        assert!(filter.contains("geolink_match=debug"));
        assert!(filter.contains("geolink_ingest=debug"));
    }
}
