// ABOUTME: Logging configuration and tracing subscriber setup for the Gatekeeper driver
// ABOUTME: Reads level and format from the environment and quiets HTTP client internals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging setup shared by the CLI and embedding applications
//!
//! Console output always goes to stderr. When `LOG_FILE` is set, a second
//! plain-text output is appended to that file with its own threshold
//! (`LOG_FILE_LEVEL`, defaulting to the console level).

use std::env;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::{Directive, LevelFilter},
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

const DEFAULT_SERVICE_NAME: &str = "gatekeeper-driver";

/// HTTP client internals that stay at `warn` whatever the configured level
const QUIET_TARGETS: [&str; 3] = ["hyper=warn", "hyper_util=warn", "reqwest=warn"];

/// Output layer attached to the global registry
pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Console filter: a level or a full `RUST_LOG` directive list
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include span enter/exit events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Optional log file, appended to
    pub file: Option<PathBuf>,
    /// Filter for the log file output
    pub file_level: String,
}

/// Keeps the background file writer alive; drop it last to flush the file
#[must_use = "dropping the guard stops file logging"]
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` lines for log shippers
    Json,
    /// Multi-line human-readable output
    Pretty,
    /// One line per event
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_spans: false,
            service_name: DEFAULT_SERVICE_NAME.into(),
            file: None,
            file_level: "info".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    ///
    /// An unknown `LOG_FORMAT` falls back to pretty output.
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
        Self {
            format: env::var("LOG_FORMAT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(LogFormat::Pretty),
            include_location: env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| DEFAULT_SERVICE_NAME.into()),
            file: env::var("LOG_FILE")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            file_level: env::var("LOG_FILE_LEVEL").unwrap_or_else(|_| level.clone()),
            level,
        }
    }

    /// Same configuration at a different console level
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Same configuration with a log file at its own level
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, level: impl Into<String>) -> Self {
        self.file = Some(path.into());
        self.file_level = level.into();
        self
    }

    /// Console filter: the configured directives, `warn` for HTTP internals
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        build_filter(&self.level)
    }

    /// Console output layer in the configured format, with its filter applied
    #[must_use]
    pub fn console_layer(&self) -> BoxedLayer {
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let layer: BoxedLayer = match self.format {
            LogFormat::Json => fmt::layer()
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .with_target(true)
                .with_writer(io::stderr)
                .with_span_events(span_events)
                .json()
                .boxed(),
            LogFormat::Pretty => fmt::layer()
                .with_file(self.include_location)
                .with_line_number(self.include_location)
                .with_target(true)
                .with_writer(io::stderr)
                .with_span_events(span_events)
                .boxed(),
            LogFormat::Compact => fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(io::stderr)
                .with_span_events(FmtSpan::NONE)
                .boxed(),
        };
        layer.with_filter(self.env_filter()).boxed()
    }

    /// File output layer, if a log file is configured
    ///
    /// Parent directories are created and the file is opened for appending.
    /// The returned guard must outlive all logging to the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its directory cannot be created
    pub fn file_layer(&self) -> Result<Option<(BoxedLayer, WorkerGuard)>> {
        let Some(path) = &self.file else {
            return Ok(None);
        };
        if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let (writer, guard) = tracing_appender::non_blocking(file);

        let layer = fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_writer(writer)
            .with_filter(build_filter(&self.file_level))
            .boxed();
        Ok(Some((layer, guard)))
    }

    /// Initialize the global tracing subscriber
    ///
    /// Events go to stderr so command output on stdout stays clean, and to
    /// the log file when one is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be opened or a global
    /// subscriber is already installed
    pub fn init(&self) -> Result<LoggingGuard> {
        let mut layers = vec![self.console_layer()];
        let file_guard = match self.file_layer()? {
            Some((file_layer, file_guard)) => {
                layers.push(file_layer);
                Some(file_guard)
            }
            None => None,
        };
        tracing_subscriber::registry().with(layers).try_init()?;

        info!(
            service.name = %self.service_name,
            service.version = env!("CARGO_PKG_VERSION"),
            log.level = %self.level,
            log.format = ?self.format,
            log.file = ?self.file,
            log.file_level = %self.file_level,
            "Logging initialized"
        );
        Ok(LoggingGuard { _file: file_guard })
    }
}

/// Filter from a directive list plus the HTTP-internals quieting
///
/// The driver's own target is pinned only when `level` is a bare level; a
/// full directive list is taken as given.
fn build_filter(level: &str) -> EnvFilter {
    let mut filter = EnvFilter::new(level);
    for raw in QUIET_TARGETS {
        if let Ok(quiet) = raw.parse::<Directive>() {
            filter = filter.add_directive(quiet);
        }
    }
    if let Ok(single) = level.trim().parse::<LevelFilter>() {
        if let Ok(own) = format!("gatekeeper_driver={single}").parse::<Directive>() {
            filter = filter.add_directive(own);
        }
    }
    filter
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<LoggingGuard> {
    LoggingConfig::from_env().init()
}
