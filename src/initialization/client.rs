//! HTTP client initialization.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::ProbeConfig;
use crate::error_handling::InitializationError;

/// Initializes the HTTP client used by the diagnostic probe.
///
/// Redirects are disabled: the probe follows them manually so it can record
/// each hop's status code and URL. The per-request timeout is applied at
/// request time from the probe configuration, not baked into the client.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_probe_client(config: &ProbeConfig) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    Ok(Arc::new(client))
}
