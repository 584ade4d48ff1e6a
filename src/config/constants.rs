//! Configuration constants.

// Probe defaults
/// Default per-request timeout for the diagnostic GET, in seconds.
///
/// Can be overridden with the `DIAG_TIMEOUT_SECONDS` environment variable or
/// the `--timeout-seconds` CLI flag.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Fixed identifying User-Agent sent with every diagnostic request.
///
/// Deliberately honest rather than browser-like: the probe is a diagnostic
/// tool and target operators should be able to recognize it in their logs.
pub const DEFAULT_USER_AGENT: &str = "network-diag-agent/1.0";

/// DNS query timeout in seconds.
pub const DNS_TIMEOUT_SECS: u64 = 5;

// Redirect handling
/// Maximum number of redirect hops to follow.
/// Prevents infinite redirect loops and excessive request chains.
pub const MAX_REDIRECT_HOPS: usize = 10;

// Environment variable names
/// Timeout override for the probe (non-negative integer seconds).
/// Invalid or non-numeric values silently fall back to the default.
pub const ENV_TIMEOUT_SECONDS: &str = "DIAG_TIMEOUT_SECONDS";

/// Cloud region of the deployed agent, e.g. `us-central1`.
pub const ENV_LOCATION: &str = "LOCATION";

/// Full resource name of the deployed agent engine.
pub const ENV_AGENT_RESOURCE_NAME: &str = "AGENT_RESOURCE_NAME";

/// Bearer token used to authenticate against the agent platform API.
pub const ENV_AGENT_ACCESS_TOKEN: &str = "AGENT_ACCESS_TOKEN";

// Report shape
/// Placeholder stored in `content_preview` instead of real body content.
/// The probe never captures response bodies (privacy/size guard).
pub const REDACTION_MARKER: &str = "REMOVED";

/// Name of the redacted report field stripped again at display time.
pub const REDACTION_FIELD: &str = "content_preview";

// Agent boundary
/// Name of the single diagnostic tool the agent exposes.
pub const TOOL_NAME: &str = "get_url_connection_report";

/// User id attached to agent sessions created by this client.
pub const DEFAULT_USER_ID: &str = "u_diag";
