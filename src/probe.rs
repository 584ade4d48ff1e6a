//! The diagnostic probe: one HTTP GET, one structured report.
//!
//! The report is the error channel for this layer. Whatever goes wrong on
//! the wire ends up classified into `error_message`; nothing propagates as
//! `Err`. There is deliberately no retry: a diagnostic must reflect one real
//! attempt, not a smoothed average.

use std::time::Instant;

use hickory_resolver::TokioAsyncResolver;
use log::debug;
use reqwest::Url;
use thiserror::Error;
use tokio::time::Duration;

use crate::config::{ProbeConfig, MAX_REDIRECT_HOPS};
use crate::dns::resolve_ipv4;
use crate::error_handling::error_details;
use crate::report::{DiagnosticReport, ReportStatus};

/// Internal failure modes of the GET step, used only for classification.
#[derive(Error, Debug)]
enum ProbeError {
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    #[error("invalid redirect location")]
    Location(#[from] url::ParseError),

    #[error("redirect chain exceeded {0} hops")]
    TooManyRedirects(usize),
}

/// Probes `url` with a single GET and returns the diagnostic report.
///
/// DNS resolution runs first and is best-effort: any failure is swallowed
/// and only leaves `ip_addresses` empty. The GET itself is authoritative.
/// Redirects are followed manually (the client must have redirects disabled)
/// so each hop's status code and URL land in `redirect_history`.
///
/// # Arguments
///
/// * `url` - The URL to probe
/// * `config` - Timeout and User-Agent settings
/// * `client` - HTTP client with redirects disabled
/// * `resolver` - DNS resolver instance
pub async fn build_report(
    url: &str,
    config: &ProbeConfig,
    client: &reqwest::Client,
    resolver: &TokioAsyncResolver,
) -> DiagnosticReport {
    let mut report = DiagnosticReport::new(url);

    // DNS step (best-effort, non-fatal)
    if let Some(host) = Url::parse(url).ok().and_then(|u| u.host_str().map(String::from)) {
        match resolve_ipv4(&host, resolver).await {
            Ok(addresses) => report.ip_addresses = addresses,
            Err(e) => debug!("DNS resolution failed for {host}: {e:#}"),
        }
    } else {
        debug!("Could not parse hostname from {url}, skipping DNS step");
    }

    // HTTP step (authoritative)
    let start = Instant::now();
    match follow_redirects(url, config, client, &mut report.redirect_history).await {
        Ok(response) => {
            report.status = ReportStatus::Success;
            report.status_code = Some(response.status().as_u16());
            report.final_url = Some(response.url().to_string());
            report.response_time_seconds = Some(start.elapsed().as_secs_f64());
            report.headers = response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.to_string(),
                        value.to_str().unwrap_or_default().to_string(),
                    )
                })
                .collect();
        }
        Err(e) => {
            report.error_message = classify_error(&e, config.timeout_seconds);
            report.redirect_history.clear();
        }
    }

    report
}

/// Follows the redirect chain manually, recording each hop.
///
/// Each traversed hop appends `(status_code, url_requested_at_that_hop)` to
/// `history`. The first non-redirect response is returned as-is; its body is
/// never read.
async fn follow_redirects(
    start_url: &str,
    config: &ProbeConfig,
    client: &reqwest::Client,
    history: &mut Vec<(u16, String)>,
) -> Result<reqwest::Response, ProbeError> {
    let timeout = Duration::from_secs(config.timeout_seconds);
    let mut current = start_url.to_string();

    for _ in 0..MAX_REDIRECT_HOPS {
        let response = client.get(&current).timeout(timeout).send().await?;
        let status = response.status();

        if status.is_redirection() {
            if let Some(location) = response.headers().get(reqwest::header::LOCATION) {
                let location = location.to_str().unwrap_or_default().to_string();
                // Absolute Location first, then resolve relative to the current URL
                let next = Url::parse(&location)
                    .or_else(|_| Url::parse(&current).and_then(|base| base.join(&location)))?;
                history.push((status.as_u16(), current.clone()));
                current = next.to_string();
                continue;
            }
            // Redirect status without a Location header: treat as final
        }
        return Ok(response);
    }
    Err(ProbeError::TooManyRedirects(MAX_REDIRECT_HOPS))
}

/// Classifies a probe failure into the report's error message.
///
/// Branches are mutually exclusive, most specific first: timeout, then
/// connection-level failure, then any other transport failure, then the
/// catch-all for everything that was not an HTTP error at all.
fn classify_error(error: &ProbeError, timeout_seconds: u64) -> String {
    match error {
        ProbeError::Http(e) if e.is_timeout() => format!(
            "Request timed out after {timeout_seconds} seconds. Timeout set to {timeout_seconds}s."
        ),
        ProbeError::Http(e) if e.is_connect() => format!(
            "Connection error occurred (DNS/Firewall/Route). Details: {}",
            error_details(e)
        ),
        ProbeError::Http(e) => format!(
            "An unexpected request error occurred. Details: {}",
            error_details(e)
        ),
        other => format!(
            "A general exception occurred. Details: {}",
            error_details(other)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_too_many_redirects_uses_catch_all() {
        let err = ProbeError::TooManyRedirects(MAX_REDIRECT_HOPS);
        let msg = classify_error(&err, 5);
        assert!(msg.starts_with("A general exception occurred."));
        assert!(msg.contains("10 hops"));
    }

    #[test]
    fn test_classify_bad_location_uses_catch_all() {
        let err = ProbeError::Location(url::ParseError::EmptyHost);
        let msg = classify_error(&err, 5);
        assert!(msg.starts_with("A general exception occurred."));
        assert!(msg.contains("invalid redirect location"));
    }
}
