//! Error type definitions and error-text helpers.
//!
//! Probe failures are never surfaced as `Err` values: the diagnostic report
//! itself is the error channel for that layer (see [`crate::probe`]). The
//! types here cover the layers around it: startup, configuration, and
//! response extraction.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for required configuration.
///
/// Missing configuration is fatal at startup: the process exits with code 1
/// and a message naming the missing setting.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("required environment variable {0} is not set")]
    MissingEnv(&'static str),
}

/// Error types for agent-response extraction.
///
/// Both variants are non-fatal to the caller: the batch loop reports them and
/// continues with the next URL.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// No event in the stream carried a final text response.
    ///
    /// Distinct from a parse error: the model produced only function calls
    /// (or nothing at all), so there is no text to parse.
    #[error("no final text response found in the event stream")]
    NoFinalResponse,

    /// The final text response was not valid JSON.
    #[error("error parsing agent response as JSON: {source}")]
    Parse {
        /// The raw response text, kept for diagnosis.
        raw: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

/// Renders an error and its source chain as a single detail string.
///
/// Single quotes are normalized to double quotes so the text embeds cleanly
/// in the JSON-shaped report.
pub fn error_details(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut current = err.source();
    while let Some(source) = current {
        out.push_str(": ");
        out.push_str(&source.to_string());
        current = source.source();
    }
    out.replace('\'', "\"")
}
