//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and the probe configuration passed into the report builder.

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ENV_TIMEOUT_SECONDS};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Which agent engine backend answers the queries.
#[derive(Clone, Debug, ValueEnum)]
pub enum EngineKind {
    /// Run the diagnostic tool in-process and synthesize the event stream
    Local,
    /// Query a deployed agent engine over its REST API
    Remote,
}

/// Command-line options and configuration.
///
/// All options have sensible defaults and can be overridden via command-line
/// flags. Remote-engine credentials come from the environment, not from flags.
///
/// # Examples
///
/// ```bash
/// # Probe two URLs with the in-process engine
/// network_diag https://httpbin.org/get https://example.com
///
/// # Dump the raw event stream alongside the cleaned reports
/// network_diag --debug https://httpbin.org/get
///
/// # Query a deployed agent instead
/// network_diag --engine remote https://httpbin.org/get
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "network_diag",
    about = "Queries a URL-diagnostic agent and prints cleaned JSON connection reports."
)]
pub struct Config {
    /// URLs to diagnose
    #[arg(value_parser)]
    pub urls: Vec<String>,

    /// Print the full raw event stream for each query (to stderr)
    #[arg(long)]
    pub debug: bool,

    /// Agent engine backend
    #[arg(long, value_enum, default_value_t = EngineKind::Local)]
    pub engine: EngineKind,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-request timeout in seconds (overrides DIAG_TIMEOUT_SECONDS)
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// HTTP User-Agent header value sent by the probe
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

/// Probe configuration (no CLI dependencies).
///
/// An explicit struct rather than ambient process state so tests can inject
/// deterministic values.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ProbeConfig {
    /// Builds a probe configuration from the process environment.
    ///
    /// Reads `DIAG_TIMEOUT_SECONDS`; absent, non-numeric, or negative values
    /// silently fall back to the default of 5 seconds.
    pub fn from_env() -> Self {
        let raw = std::env::var(ENV_TIMEOUT_SECONDS).ok();
        Self {
            timeout_seconds: resolve_timeout_seconds(raw.as_deref()),
            ..Self::default()
        }
    }
}

/// Parses a timeout override, falling back to the default on any failure.
fn resolve_timeout_seconds(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
}
