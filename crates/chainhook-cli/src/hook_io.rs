use serde::Deserialize;
use serde_json::{json, Value};
use std::io::Read;

// ---------------------------------------------------------------------------
// HookInput
// ---------------------------------------------------------------------------

/// One JSON object per invocation on stdin, as delivered by the host's hook
/// system. Every field is optional: an unparsable payload degrades to the
/// default (all absent), never to an error.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HookInput {
    pub tool_name: String,
    pub session_id: String,
    pub prompt: String,
    pub tool_input: Value,
    pub tool_response: Value,
}

impl HookInput {
    pub fn from_reader(mut reader: impl Read) -> Self {
        let mut buf = String::new();
        if reader.read_to_string(&mut buf).is_err() {
            return Self::default();
        }
        serde_json::from_str(&buf).unwrap_or_default()
    }

    /// String field from `tool_input`, empty strings treated as absent.
    pub fn tool_input_str(&self, key: &str) -> Option<String> {
        self.tool_input
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(String::from)
    }

    /// Flatten `tool_response` to plain text. Handles a bare string, an
    /// object carrying `content`, and arrays of `{type, text}` blocks.
    pub fn response_text(&self) -> String {
        fn flatten(value: &Value) -> String {
            match value {
                Value::Null => String::new(),
                Value::String(s) => s.clone(),
                Value::Array(blocks) => blocks
                    .iter()
                    .map(|b| match b {
                        Value::Object(map) => map
                            .get("text")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                        other => flatten(other),
                    })
                    .collect::<Vec<_>>()
                    .join(" "),
                Value::Object(map) => map.get("content").map(flatten).unwrap_or_default(),
                other => other.to_string(),
            }
        }
        flatten(&self.tool_response)
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Structured denial for a pre-invocation check.
pub fn print_deny(event_name: &str, reason: &str) {
    let out = json!({
        "hookSpecificOutput": {
            "hookEventName": event_name,
            "permissionDecision": "deny",
            "permissionDecisionReason": reason,
        }
    });
    println!("{out}");
}

/// Context injection for the assistant's next turn.
pub fn print_context(event_name: &str, context: &str) {
    let out = json!({
        "hookSpecificOutput": {
            "hookEventName": event_name,
            "additionalContext": context,
        }
    });
    println!("{out}");
}

/// Context injection that is also shown to the user as a system message
/// (used on prompt submit, where the guidance is for both parties).
pub fn print_visible_context(event_name: &str, context: &str) {
    let out = json!({
        "systemMessage": context,
        "hookSpecificOutput": {
            "hookEventName": event_name,
            "additionalContext": context,
        }
    });
    println!("{out}");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_input_degrades_to_default() {
        let input = HookInput::from_reader("{not json".as_bytes());
        assert!(input.tool_name.is_empty());
        assert!(input.session_id.is_empty());
    }

    #[test]
    fn tool_input_fields() {
        let input = HookInput::from_reader(
            r#"{"tool_name":"t","tool_input":{"chain_id":"chain-x","gate_verdict":""}}"#.as_bytes(),
        );
        assert_eq!(input.tool_input_str("chain_id").as_deref(), Some("chain-x"));
        assert!(input.tool_input_str("gate_verdict").is_none());
        assert!(input.tool_input_str("user_response").is_none());
    }

    #[test]
    fn response_text_from_string() {
        let input =
            HookInput::from_reader(r#"{"tool_response":"Step 2 of 5"}"#.as_bytes());
        assert_eq!(input.response_text(), "Step 2 of 5");
    }

    #[test]
    fn response_text_from_content_blocks() {
        let input = HookInput::from_reader(
            r#"{"tool_response":{"content":[{"type":"text","text":"Step 1"},{"type":"text","text":"of 3"}]}}"#
                .as_bytes(),
        );
        assert_eq!(input.response_text(), "Step 1 of 3");
    }

    #[test]
    fn response_text_from_content_string() {
        let input = HookInput::from_reader(
            r###"{"tool_response":{"content":"## Gate\n- a"}}"###.as_bytes(),
        );
        assert_eq!(input.response_text(), "## Gate\n- a");
    }

    #[test]
    fn response_text_missing_is_empty() {
        let input = HookInput::from_reader(r#"{"tool_name":"t"}"#.as_bytes());
        assert_eq!(input.response_text(), "");
    }
}
