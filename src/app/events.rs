use crate::models::Attachment;

/// Everything the user can do to the chat surface.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Submit a message in the active conversation
    Send(String),
    /// Stage a file for the next send
    Attach(Attachment),
    /// Drop the staged file
    RemoveAttachment,
    /// Open a conversation from the sidebar
    SelectChat(String),
    /// Start a new conversation
    NewChat,
    /// Reload the sidebar
    RefreshChats,
}
