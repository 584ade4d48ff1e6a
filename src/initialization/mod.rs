//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources:
//! - the HTTP client used by the probe (redirects disabled)
//! - the DNS resolver
//! - the logger
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::init_probe_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;
