use serde_json::{Map, Value};

use crate::error::InteractionError;

/// What the display surface is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Idle,
    Loading,
    Shown(String),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub role: Role,
    pub text: String,
}

impl TranscriptEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Input was empty after trimming.
    Empty,
    /// A request from this client has not resolved yet.
    InFlight,
}

/// Result of one call to `InteractionClient::submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    Skipped(SkipReason),
    Completed(DisplayState),
}

/// Single-key request body, e.g. `{"prompt": "..."}`.
pub fn request_body(field: &str, text: &str) -> Value {
    let mut body = Map::new();
    body.insert(field.to_string(), Value::String(text.to_string()));
    Value::Object(body)
}

/// Pull the display text out of a reply.
///
/// Missing, `null`, `""`, `0`, `false` and structured values are all treated as a
/// malformed reply. Other numbers and `true` are shown as their JSON text.
pub fn extract_reply(reply: &Value, field: &str) -> Result<String, InteractionError> {
    let shape_error = || InteractionError::ResponseShape {
        field: field.to_string(),
    };

    match reply.get(field) {
        Some(Value::String(text)) if !text.is_empty() => Ok(text.clone()),
        Some(Value::Bool(true)) => Ok("true".to_string()),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Ok(n.to_string()),
        _ => Err(shape_error()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_uses_configured_field() {
        assert_eq!(request_body("text", "What is 2+2?"), json!({ "text": "What is 2+2?" }));
    }

    #[test]
    fn extracts_strings_and_scalars() {
        assert_eq!(extract_reply(&json!({ "answer": "4" }), "answer").unwrap(), "4");
        assert_eq!(extract_reply(&json!({ "answer": 4 }), "answer").unwrap(), "4");
        assert_eq!(extract_reply(&json!({ "answer": -1.5 }), "answer").unwrap(), "-1.5");
        assert_eq!(extract_reply(&json!({ "ok": true }), "ok").unwrap(), "true");
    }

    #[test]
    fn unusable_replies_are_shape_errors() {
        for reply in [
            json!({}),
            json!({ "reply": null }),
            json!({ "reply": "" }),
            json!({ "reply": 0 }),
            json!({ "reply": -0.0 }),
            json!({ "reply": false }),
            json!({ "reply": ["a"] }),
            json!({ "other": "hello" }),
            json!("hello"),
        ] {
            assert!(matches!(
                extract_reply(&reply, "reply"),
                Err(InteractionError::ResponseShape { .. })
            ));
        }
    }
}
