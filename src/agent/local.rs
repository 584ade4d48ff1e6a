//! In-process agent engine.
//!
//! Runs the diagnostic tool directly and synthesizes the chat event stream a
//! hosted model would produce: a function-call event, the tool's response,
//! and a final text event carrying the report as raw JSON. Useful for local
//! runs without credentials and for exercising the extraction path end to
//! end.

use std::sync::Arc;

use anyhow::Result;
use hickory_resolver::TokioAsyncResolver;
use log::debug;

use crate::agent::{AgentEngine, Session};
use crate::config::{ProbeConfig, TOOL_NAME};
use crate::error_handling::InitializationError;
use crate::events::Event;
use crate::initialization::{init_probe_client, init_resolver};
use crate::probe::build_report;

/// Agent engine that invokes the diagnostic tool in-process.
pub struct LocalEngine {
    client: Arc<reqwest::Client>,
    resolver: Arc<TokioAsyncResolver>,
    probe_config: ProbeConfig,
}

impl LocalEngine {
    /// Creates a local engine with its own HTTP client and DNS resolver.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(probe_config: ProbeConfig) -> Result<Self, InitializationError> {
        let client = init_probe_client(&probe_config)?;
        let resolver = init_resolver();
        Ok(Self {
            client,
            resolver,
            probe_config,
        })
    }
}

impl AgentEngine for LocalEngine {
    async fn create_session(&self, user_id: &str) -> Result<Session> {
        let id = format!("session_{}", chrono::Utc::now().timestamp_millis());
        debug!("Created local session {id} for user {user_id}");
        Ok(Session { id })
    }

    async fn stream_query(
        &self,
        _user_id: &str,
        session_id: &str,
        message: &str,
    ) -> Result<Vec<Event>> {
        // The agent contract: the message is the URL, nothing else.
        let url = message.trim();
        debug!("Local query in session {session_id}: {url}");

        let report = build_report(url, &self.probe_config, &self.client, &self.resolver).await;
        let report_value = serde_json::to_value(&report)?;

        Ok(vec![
            Event::function_call(TOOL_NAME, serde_json::json!({ "url": url })),
            Event::function_response(TOOL_NAME, report_value),
            Event::final_text(&serde_json::to_string(&report)?),
        ])
    }
}
