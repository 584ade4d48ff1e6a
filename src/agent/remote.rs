//! REST client for a deployed agent engine.
//!
//! Speaks the platform's `:query` / `:streamQuery` surface directly: JSON
//! bodies selecting a class method, bearer-token auth, and a streamed
//! response body holding a sequence of JSON events. The body is buffered to
//! completion before parsing; no incremental processing of an open stream.

use anyhow::{bail, Context, Result};
use log::debug;
use serde_json::{json, Value};

use crate::agent::{AgentEngine, Session};
use crate::config::{ENV_AGENT_ACCESS_TOKEN, ENV_AGENT_RESOURCE_NAME, ENV_LOCATION};
use crate::error_handling::ConfigError;
use crate::events::Event;

/// Agent engine backed by a deployed agent's REST API.
#[derive(Debug)]
pub struct RemoteEngine {
    client: reqwest::Client,
    endpoint: String,
    resource_name: String,
    token: String,
}

/// Reads a required environment variable, rejecting empty values.
fn require_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnv(name)),
    }
}

impl RemoteEngine {
    /// Builds a remote engine from the environment.
    ///
    /// Requires `LOCATION`, `AGENT_RESOURCE_NAME`, and `AGENT_ACCESS_TOKEN`.
    /// A missing variable is a configuration error the caller treats as
    /// fatal at startup.
    pub fn from_env() -> Result<Self> {
        let location = require_env(ENV_LOCATION)?;
        let resource_name = require_env(ENV_AGENT_RESOURCE_NAME)?;
        let token = require_env(ENV_AGENT_ACCESS_TOKEN)?;
        let endpoint = format!("https://{location}-aiplatform.googleapis.com/v1");
        Self::with_endpoint(endpoint, resource_name, token)
    }

    /// Builds a remote engine against an explicit endpoint (used by tests).
    pub fn with_endpoint(endpoint: String, resource_name: String, token: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("failed to build agent API client")?;
        Ok(Self {
            client,
            endpoint,
            resource_name,
            token,
        })
    }

    /// POSTs a class-method invocation to the given verb (`query` or
    /// `streamQuery`) and returns the raw response.
    async fn invoke(&self, verb: &str, body: &Value) -> Result<reqwest::Response> {
        let url = format!("{}/{}:{verb}", self.endpoint, self.resource_name);
        debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .with_context(|| format!("agent API request to :{verb} failed"))?;
        response
            .error_for_status()
            .with_context(|| format!("agent API :{verb} returned an error status"))
    }
}

impl AgentEngine for RemoteEngine {
    async fn create_session(&self, user_id: &str) -> Result<Session> {
        let body = json!({
            "class_method": "async_create_session",
            "input": { "user_id": user_id },
        });
        let response = self.invoke("query", &body).await?;
        let value: Value = response
            .json()
            .await
            .context("failed to decode session response")?;

        // The session record arrives under "output"; tolerate a bare record too
        let id = value["output"]["id"]
            .as_str()
            .or_else(|| value["id"].as_str())
            .map(String::from);
        match id {
            Some(id) => Ok(Session { id }),
            None => bail!("session response carried no id: {value}"),
        }
    }

    async fn stream_query(
        &self,
        user_id: &str,
        session_id: &str,
        message: &str,
    ) -> Result<Vec<Event>> {
        let body = json!({
            "class_method": "async_stream_query",
            "input": {
                "user_id": user_id,
                "session_id": session_id,
                "message": message,
            },
        });
        let response = self.invoke("streamQuery", &body).await?;

        // Buffer the whole stream before parsing; events arrive as a
        // whitespace-delimited sequence of JSON objects
        let text = response
            .text()
            .await
            .context("failed to read event stream body")?;
        let events = serde_json::Deserializer::from_str(&text)
            .into_iter::<Event>()
            .collect::<Result<Vec<_>, _>>()
            .context("failed to decode event stream")?;
        Ok(events)
    }
}
