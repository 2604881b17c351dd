use serde::{Deserialize, Serialize};

/// JSON body of `POST /chat/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub chat_id: String,
    pub message: String,
}

impl ChatRequest {
    pub fn new(chat_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            message: message.into(),
        }
    }
}

/// JSON body of `POST /reset`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResetRequest {
    pub chat_id: String,
}
