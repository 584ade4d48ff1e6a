//! Chat-style event records exchanged with the agent engine.
//!
//! Events mirror the wire shape of the agent platform's streaming responses:
//! each event optionally carries `content.parts`, and each part optionally
//! carries `text` and/or `function_call`. Unknown fields are ignored on
//! deserialization; only the first part of each event's content is ever
//! inspected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One record of the agent's event stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// The event payload, absent for bookkeeping events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

/// Payload of an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Ordered content parts. Consumers inspect only the first.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One part of an event's content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Plain text produced by the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// A tool invocation requested by the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<Value>,
    /// The tool's result echoed back into the stream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<Value>,
}

impl Event {
    /// Returns the text of the first content part, if any.
    pub fn text(&self) -> Option<&str> {
        self.content.as_ref()?.parts.first()?.text.as_deref()
    }

    /// Whether the first content part carries a function call.
    pub fn has_function_call(&self) -> bool {
        self.content
            .as_ref()
            .and_then(|c| c.parts.first())
            .is_some_and(|p| p.function_call.is_some())
    }

    /// Builds a function-call event as the model would emit it.
    pub fn function_call(name: &str, args: Value) -> Self {
        Self {
            content: Some(Content {
                parts: vec![Part {
                    function_call: Some(serde_json::json!({ "name": name, "args": args })),
                    ..Part::default()
                }],
            }),
        }
    }

    /// Builds a function-response event carrying a tool result.
    pub fn function_response(name: &str, response: Value) -> Self {
        Self {
            content: Some(Content {
                parts: vec![Part {
                    function_response: Some(
                        serde_json::json!({ "name": name, "response": response }),
                    ),
                    ..Part::default()
                }],
            }),
        }
    }

    /// Builds a final text event.
    pub fn final_text(text: &str) -> Self {
        Self {
            content: Some(Content {
                parts: vec![Part {
                    text: Some(text.to_string()),
                    ..Part::default()
                }],
            }),
        }
    }
}
