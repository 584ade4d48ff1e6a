//! The agent-engine boundary.
//!
//! The hosting platform is an external collaborator exposing two operations:
//! session creation and a request/response streaming query. [`AgentEngine`]
//! models that seam; the stream is always consumed to completion before any
//! extraction logic runs, so queries yield a fully buffered `Vec<Event>`.

mod local;
mod remote;

pub use local::LocalEngine;
pub use remote::RemoteEngine;

use anyhow::Result;

use crate::events::Event;

/// A conversation handle on the agent platform.
#[derive(Debug, Clone)]
pub struct Session {
    /// Platform-assigned session identifier.
    pub id: String,
}

/// An agent backend that answers diagnostic queries.
///
/// Implementations are used through generic bounds, not trait objects; the
/// batch runner is monomorphized per engine.
#[allow(async_fn_in_trait)]
pub trait AgentEngine {
    /// Creates a new session for `user_id`.
    async fn create_session(&self, user_id: &str) -> Result<Session>;

    /// Sends one message within a session and buffers the full event stream.
    ///
    /// For this agent the message is a single URL. No session-level timeout
    /// is applied; only the inner diagnostic GET is bounded.
    async fn stream_query(
        &self,
        user_id: &str,
        session_id: &str,
        message: &str,
    ) -> Result<Vec<Event>>;
}
