//! The diagnostic report produced by a single URL probe.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::REDACTION_MARKER;

/// Overall outcome of a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// The GET completed with a response (any status code).
    Success,
    /// The GET failed; `error_message` carries the classification.
    Error,
}

/// Structured result of one HTTP GET probe.
///
/// Constructed fresh per invocation and immutable once returned. Exactly one
/// of the following holds:
/// - `status == Success` and `status_code` is set, or
/// - `status == Error` and `error_message` is non-empty.
///
/// `content_preview` is always the fixed redaction marker, never real body
/// content. `ip_addresses` may be empty when DNS resolution failed; a DNS
/// failure alone never turns the report into an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    /// The URL that was probed (input echo).
    pub url: String,
    /// Success/error classification.
    pub status: ReportStatus,
    /// Error description; empty unless `status` is `Error`.
    pub error_message: String,
    /// HTTP status code of the final response.
    pub status_code: Option<u16>,
    /// URL after following all redirects.
    pub final_url: Option<String>,
    /// Response headers of the final response, flattened to single values.
    pub headers: HashMap<String, String>,
    /// Always the redaction marker; bodies are never captured.
    pub content_preview: String,
    /// Unique IPv4 addresses the hostname resolved to (order irrelevant).
    pub ip_addresses: Vec<String>,
    /// Wall-clock time for the whole request, in seconds.
    pub response_time_seconds: Option<f64>,
    /// One `(status_code, url)` entry per redirect hop, in traversal order.
    pub redirect_history: Vec<(u16, String)>,
}

impl DiagnosticReport {
    /// Creates a fresh report for `url` in its initial (error, empty) state.
    ///
    /// The probe flips it to `Success` only when the GET completes.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            status: ReportStatus::Error,
            error_message: String::new(),
            status_code: None,
            final_url: None,
            headers: HashMap::new(),
            content_preview: REDACTION_MARKER.to_string(),
            ip_addresses: Vec::new(),
            response_time_seconds: None,
            redirect_history: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_initial_state() {
        let report = DiagnosticReport::new("https://example.com");
        assert_eq!(report.url, "https://example.com");
        assert_eq!(report.status, ReportStatus::Error);
        assert!(report.error_message.is_empty());
        assert_eq!(report.status_code, None);
        assert_eq!(report.content_preview, REDACTION_MARKER);
        assert!(report.ip_addresses.is_empty());
        assert!(report.redirect_history.is_empty());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let report = DiagnosticReport::new("https://example.com");
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["content_preview"], REDACTION_MARKER);
        assert!(value["status_code"].is_null());
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let mut report = DiagnosticReport::new("https://example.com");
        report.status = ReportStatus::Success;
        report.status_code = Some(200);
        report.final_url = Some("https://example.com/".to_string());
        report.redirect_history = vec![(301, "https://example.com".to_string())];
        let json = serde_json::to_string(&report).unwrap();
        let back: DiagnosticReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
