//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, redirect budget, env var names)
//! - CLI option types and parsing
//! - The probe configuration struct passed into the report builder

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, EngineKind, LogFormat, LogLevel, ProbeConfig};
