//! Extraction of the cleaned diagnostic report from an agent event stream.
//!
//! The model is instructed to answer with nothing but the raw JSON returned
//! by the diagnostic tool, but instruction-following is not guaranteed. This
//! module is the sole defense: it locates the final text response, strips
//! Markdown fencing, unwraps the single-key envelope some models add around
//! tool output, and drops the redacted preview field.

use serde_json::Value;

use crate::config::REDACTION_FIELD;
use crate::error_handling::ExtractError;
use crate::events::Event;

/// Extracts the cleaned report object from a buffered event stream.
///
/// Qualifying events are those whose first content part carries non-empty
/// text and no function call; the earliest one wins. The text is trimmed,
/// de-fenced if it starts with triple backticks, and parsed as JSON. A JSON
/// object with exactly one key is unwrapped to that key's value, and a
/// `content_preview` field on the result is removed (it only ever holds the
/// redaction marker).
///
/// # Errors
///
/// - [`ExtractError::NoFinalResponse`] when no event qualifies.
/// - [`ExtractError::Parse`] when the text is not valid JSON; the raw text
///   is carried along for diagnosis.
pub fn extract_report(events: &[Event]) -> Result<Value, ExtractError> {
    let first = events
        .iter()
        .find(|e| is_final_text(e))
        .ok_or(ExtractError::NoFinalResponse)?;

    // is_final_text guarantees text is present
    let raw = first.text().unwrap_or_default().trim().to_string();
    let clean = strip_code_fence(&raw);

    let parsed: Value = serde_json::from_str(&clean).map_err(|source| ExtractError::Parse {
        raw: raw.clone(),
        source,
    })?;

    // Unwrap the model's single-key envelope (typically named after the tool).
    // A legitimately single-key report is indistinguishable from an envelope;
    // see DESIGN.md for the recorded decision.
    let mut value = parsed;
    if let Value::Object(map) = &value {
        if map.len() == 1 {
            if let Some(inner) = map.values().next() {
                value = inner.clone();
            }
        }
    }

    if let Value::Object(map) = &mut value {
        map.remove(REDACTION_FIELD);
    }

    Ok(value)
}

/// Whether an event carries a final text response rather than an
/// intermediate tool call.
fn is_final_text(event: &Event) -> bool {
    event.text().is_some_and(|t| !t.is_empty()) && !event.has_function_call()
}

/// Removes a surrounding Markdown code fence, keeping the inner lines.
///
/// Mirrors the lenient original behavior: the first and last lines are
/// dropped without checking that the last one is actually a closing fence.
fn strip_code_fence(text: &str) -> String {
    if !text.starts_with("```") {
        return text.to_string();
    }
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() <= 2 {
        return String::new();
    }
    lines[1..lines.len() - 1].join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_event(text: &str) -> Event {
        Event::final_text(text)
    }

    #[test]
    fn test_no_events_is_no_final_response() {
        let err = extract_report(&[]).unwrap_err();
        assert!(matches!(err, ExtractError::NoFinalResponse));
    }

    #[test]
    fn test_function_call_events_do_not_qualify() {
        let events = vec![
            Event::function_call("get_url_connection_report", json!({"url": "x"})),
            Event::function_response("get_url_connection_report", json!({"status": "success"})),
        ];
        let err = extract_report(&events).unwrap_err();
        assert!(matches!(err, ExtractError::NoFinalResponse));
    }

    #[test]
    fn test_first_qualifying_event_wins() {
        let events = vec![
            Event::function_call("get_url_connection_report", json!({"url": "x"})),
            text_event(r#"{"a": 1, "b": 2}"#),
            text_event(r#"{"a": 99}"#),
        ];
        let value = extract_report(&events).unwrap();
        assert_eq!(value, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_empty_text_does_not_qualify() {
        let events = vec![text_event(""), text_event(r#"{"ok": true, "n": 1}"#)];
        let value = extract_report(&events).unwrap();
        assert_eq!(value, json!({"ok": true, "n": 1}));
    }

    #[test]
    fn test_code_fence_is_stripped() {
        let fenced = "```json\n{\"x\": 1, \"y\": 2}\n```";
        let value = extract_report(&[text_event(fenced)]).unwrap();
        assert_eq!(value, json!({"x": 1, "y": 2}));
    }

    #[test]
    fn test_singleton_envelope_is_unwrapped() {
        let wrapped = r#"{"get_url_connection_report": {"url": "https://example.com", "status": "success"}}"#;
        let value = extract_report(&[text_event(wrapped)]).unwrap();
        assert_eq!(
            value,
            json!({"url": "https://example.com", "status": "success"})
        );
    }

    #[test]
    fn test_multi_key_object_passes_through() {
        let plain = r#"{"url": "https://example.com", "status": "error"}"#;
        let value = extract_report(&[text_event(plain)]).unwrap();
        assert_eq!(value, json!({"url": "https://example.com", "status": "error"}));
    }

    #[test]
    fn test_content_preview_is_removed() {
        let raw = r#"{"url": "u", "status": "success", "content_preview": "REMOVED"}"#;
        let value = extract_report(&[text_event(raw)]).unwrap();
        assert!(value.get("content_preview").is_none());
        assert_eq!(value["url"], "u");
    }

    #[test]
    fn test_content_preview_removed_after_unwrap() {
        let raw = r#"{"tool": {"url": "u", "content_preview": "REMOVED"}}"#;
        let value = extract_report(&[text_event(raw)]).unwrap();
        assert!(value.get("content_preview").is_none());
        assert_eq!(value, json!({"url": "u"}));
    }

    #[test]
    fn test_malformed_json_reports_raw_text() {
        let raw = "definitely not json";
        let err = extract_report(&[text_event(raw)]).unwrap_err();
        match err {
            ExtractError::Parse { raw: kept, .. } => assert_eq!(kept, raw),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_object_json_is_returned_as_is() {
        let value = extract_report(&[text_event("[1, 2, 3]")]).unwrap();
        assert_eq!(value, json!([1, 2, 3]));
    }

    #[test]
    fn test_fence_with_no_body_fails_to_parse() {
        let err = extract_report(&[text_event("```\n```")]).unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }));
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let value = extract_report(&[text_event("  \n {\"k\": 1, \"j\": 2} \n ")]).unwrap();
        assert_eq!(value, json!({"k": 1, "j": 2}));
    }
}
