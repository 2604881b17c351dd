use serde::{Deserialize, Serialize};

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    /// Tool output recorded by the backend; never shown
    Tool,
    /// Any role this client does not know about (e.g. "system")
    #[serde(other)]
    Other,
}

/// A stored message as returned by the chat detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    #[serde(default, deserialize_with = "super::deserialize_nullable_string")]
    pub content: String,
    /// Tool-call marker attached by the backend, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<serde_json::Value>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: None,
        }
    }

    /// True when the message carries a non-empty tool-call marker.
    pub fn has_tool_calls(&self) -> bool {
        match &self.tool_calls {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::Array(calls)) => !calls.is_empty(),
            Some(serde_json::Value::Object(map)) => !map.is_empty(),
            Some(_) => true,
        }
    }

    /// An assistant turn that only exists to carry tool calls.
    pub fn is_tool_call_placeholder(&self) -> bool {
        self.role == Role::Assistant && self.has_tool_calls() && self.content.trim().is_empty()
    }

    /// Whether the message should appear in the message pane.
    ///
    /// Tool output, tool-call placeholders, unknown roles and blank messages
    /// are bookkeeping and stay hidden.
    pub fn is_renderable(&self) -> bool {
        match self.role {
            Role::Tool | Role::Other => false,
            Role::Assistant if self.is_tool_call_placeholder() => false,
            _ => !self.content.trim().is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_role_is_hidden() {
        assert!(!Message::new(Role::Tool, "42").is_renderable());
    }

    #[test]
    fn test_placeholder_is_hidden() {
        let msg = Message {
            role: Role::Assistant,
            content: "  ".to_string(),
            tool_calls: Some(json!([{"id": "call_1", "name": "get_weather"}])),
        };
        assert!(msg.is_tool_call_placeholder());
        assert!(!msg.is_renderable());
    }

    #[test]
    fn test_assistant_with_text_and_tool_calls_is_shown() {
        let msg = Message {
            role: Role::Assistant,
            content: "Let me check.".to_string(),
            tool_calls: Some(json!([{"name": "get_weather"}])),
        };
        assert!(!msg.is_tool_call_placeholder());
        assert!(msg.is_renderable());
    }

    #[test]
    fn test_empty_tool_call_list_is_not_a_marker() {
        let msg = Message {
            role: Role::Assistant,
            content: String::new(),
            tool_calls: Some(json!([])),
        };
        assert!(!msg.has_tool_calls());
        // Still hidden because it is blank.
        assert!(!msg.is_renderable());
    }

    #[test]
    fn test_unknown_role_deserializes_as_other() {
        let msg: Message = serde_json::from_str(r#"{"role": "system", "content": "be nice"}"#).unwrap();
        assert_eq!(msg.role, Role::Other);
        assert!(!msg.is_renderable());
    }

    #[test]
    fn test_null_content_is_empty() {
        let msg: Message = serde_json::from_str(r#"{"role": "user", "content": null}"#).unwrap();
        assert_eq!(msg.content, "");
    }
}
