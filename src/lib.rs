//! network_diag library: URL diagnostics through an LLM-agent round-trip.
//!
//! The crate exposes one diagnostic tool: perform an HTTP GET against a
//! user-supplied URL and return a structured report covering DNS resolution,
//! status code, timing, the redirect chain, and error classification. The
//! agent hosting platform is modeled as the [`AgentEngine`] seam with two
//! backends: [`LocalEngine`] (in-process) and [`RemoteEngine`] (REST).
//!
//! # Example
//!
//! ```no_run
//! use network_diag::{run_batch, LocalEngine, ProbeConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = LocalEngine::new(ProbeConfig::default())?;
//! let urls = vec!["https://httpbin.org/get".to_string()];
//! let report = run_batch(&engine, &urls, false).await?;
//! eprintln!("{} succeeded, {} failed", report.succeeded, report.failed);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or call library functions from an async context.

#![warn(missing_docs)]

pub mod agent;
pub mod config;
mod dns;
mod error_handling;
mod events;
mod extract;
pub mod initialization;
mod probe;
mod report;

// Re-export public API
pub use agent::{AgentEngine, LocalEngine, RemoteEngine, Session};
pub use config::{Config, EngineKind, LogFormat, LogLevel, ProbeConfig};
pub use error_handling::{ConfigError, ExtractError, InitializationError};
pub use events::{Content, Event, Part};
pub use extract::extract_report;
pub use probe::build_report;
pub use report::{DiagnosticReport, ReportStatus};
pub use run::{run_batch, BatchReport};

// Internal run module (contains the batch query loop)
mod run {
    use std::time::Instant;

    use anyhow::{Context, Result};
    use log::{error, info};

    use crate::agent::AgentEngine;
    use crate::config::DEFAULT_USER_ID;
    use crate::error_handling::ExtractError;
    use crate::extract::extract_report;

    /// Results of a batch of diagnostic queries.
    #[derive(Debug, Clone)]
    pub struct BatchReport {
        /// Total number of URLs queried
        pub total: usize,
        /// Queries whose cleaned report was printed
        pub succeeded: usize,
        /// Queries that failed at the stream or extraction layer
        pub failed: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Queries the agent for each URL sequentially and prints cleaned reports.
    ///
    /// One session serves the whole batch. Per URL: the event stream is
    /// buffered to completion, optionally dumped raw to stderr (`debug`),
    /// then the cleaned JSON report is extracted and pretty-printed to
    /// stdout. Partial-failure isolation: a stream error, a missing final
    /// response, or a parse failure is reported to stderr and the loop
    /// continues with the next URL.
    ///
    /// # Errors
    ///
    /// Returns an error only if session creation fails; per-URL failures are
    /// absorbed into the [`BatchReport`] counts.
    pub async fn run_batch<E: AgentEngine>(
        engine: &E,
        urls: &[String],
        debug: bool,
    ) -> Result<BatchReport> {
        let start = Instant::now();

        let session = engine
            .create_session(DEFAULT_USER_ID)
            .await
            .context("failed to create agent session")?;
        info!("Session created: {}", session.id);
        info!("URLs to test: {}", urls.len());

        let mut succeeded = 0;
        let mut failed = 0;

        for url in urls {
            info!("Querying: {url}");

            let events = match engine
                .stream_query(DEFAULT_USER_ID, &session.id, url)
                .await
            {
                Ok(events) => events,
                Err(e) => {
                    error!("Query stream failed for {url}: {e:#}");
                    failed += 1;
                    continue;
                }
            };

            if debug {
                let raw = serde_json::to_string_pretty(&events)
                    .unwrap_or_else(|e| format!("<could not serialize events: {e}>"));
                eprintln!("--- [DEBUG] RAW AGENT EVENT STREAM ({url}) ---");
                eprintln!("{raw}");
                eprintln!("--- [DEBUG] END RAW EVENT STREAM ---");
            }

            match extract_report(&events) {
                Ok(report) => {
                    let pretty = serde_json::to_string_pretty(&report)
                        .context("failed to render cleaned report")?;
                    println!("{pretty}");
                    succeeded += 1;
                }
                Err(ExtractError::NoFinalResponse) => {
                    error!("No final text response found in the event stream for {url}");
                    failed += 1;
                }
                Err(ExtractError::Parse { raw, source }) => {
                    error!("Error parsing agent response as JSON for {url}: {source}");
                    eprintln!("Raw text (for error context): {raw}");
                    failed += 1;
                }
            }
        }

        Ok(BatchReport {
            total: urls.len(),
            succeeded,
            failed,
            elapsed_seconds: start.elapsed().as_secs_f64(),
        })
    }
}
