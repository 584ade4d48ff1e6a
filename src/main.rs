//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `network_diag` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Engine selection and exit codes
//!
//! Cleaned JSON reports go to stdout; everything else goes to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use network_diag::config::{
    ENV_AGENT_ACCESS_TOKEN, ENV_AGENT_RESOURCE_NAME, ENV_LOCATION,
};
use network_diag::initialization::init_logger_with;
use network_diag::{
    run_batch, AgentEngine, BatchReport, Config, EngineKind, LocalEngine, ProbeConfig,
    RemoteEngine,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    if config.urls.is_empty() {
        eprintln!("Usage: network_diag [--debug] <url1> [url2] ...");
        process::exit(1);
    }

    // Probe settings: CLI flags take precedence over DIAG_TIMEOUT_SECONDS
    let mut probe_config = ProbeConfig::from_env();
    if let Some(timeout) = config.timeout_seconds {
        probe_config.timeout_seconds = timeout;
    }
    probe_config.user_agent = config.user_agent.clone();

    let report = match &config.engine {
        EngineKind::Local => {
            let engine = match LocalEngine::new(probe_config) {
                Ok(engine) => engine,
                Err(e) => {
                    eprintln!("network_diag error: {e}");
                    process::exit(1);
                }
            };
            run(&engine, &config).await
        }
        EngineKind::Remote => {
            let engine = match RemoteEngine::from_env() {
                Ok(engine) => engine,
                Err(e) => {
                    eprintln!("ERROR: {e:#}");
                    eprintln!(
                        "Please set: {ENV_LOCATION}, {ENV_AGENT_RESOURCE_NAME}, {ENV_AGENT_ACCESS_TOKEN}"
                    );
                    process::exit(1);
                }
            };
            run(&engine, &config).await
        }
    };

    match report {
        Ok(report) => {
            // Summary goes to stderr; stdout carries only the cleaned reports
            eprintln!(
                "Processed {} URL{} ({} succeeded, {} failed) in {:.1}s",
                report.total,
                if report.total == 1 { "" } else { "s" },
                report.succeeded,
                report.failed,
                report.elapsed_seconds
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("network_diag error: {e:#}");
            process::exit(1);
        }
    }
}

async fn run<E: AgentEngine>(engine: &E, config: &Config) -> Result<BatchReport> {
    run_batch(engine, &config.urls, config.debug).await
}
