use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{deserialize_id, deserialize_lenient_datetime, Message};

/// Title shown for conversations the server has not named yet.
pub const UNTITLED_CHAT: &str = "Untitled chat";

/// Opaque identifier of a conversation.
///
/// Generated client-side on the first send and adopted by the server as the
/// canonical id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ConversationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ConversationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the conversation sidebar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatSummary {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Server-assigned title; null until the backend names the chat
    #[serde(default)]
    pub title: Option<String>,
    /// Last activity, when the backend reports it
    #[serde(default, deserialize_with = "deserialize_lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ChatSummary {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            updated_at: None,
        }
    }

    /// Title for display, falling back to [`UNTITLED_CHAT`].
    pub fn display_title(&self) -> &str {
        display_title(self.title.as_deref())
    }
}

/// Response from `GET /all-chats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatListResponse {
    #[serde(default)]
    pub chats: Vec<ChatSummary>,
}

/// Response from `GET /chat/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatDetail {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub chat_title: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl ChatDetail {
    /// Title for display, falling back to [`UNTITLED_CHAT`].
    pub fn display_title(&self) -> &str {
        display_title(self.chat_title.as_deref())
    }

    /// Messages that should appear in the message pane, in order.
    pub fn visible_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.is_renderable())
    }
}

fn display_title(title: Option<&str>) -> &str {
    match title {
        Some(t) if !t.trim().is_empty() => t,
        _ => UNTITLED_CHAT,
    }
}
