//! Session-level state.
//!
//! [`SessionState`] is the single owner of everything that used to be
//! ambient: the active conversation id, the pending attachment and the send
//! phase. The controller reads the id at the start of each operation.

use crate::models::{Attachment, ConversationId};
use crate::traits::Navigator;

use super::phase::SendPhase;

/// Mutable state shared by every handler.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    chat_id: Option<ConversationId>,
    pending_attachment: Option<Attachment>,
    /// Lifecycle of the most recent send
    pub phase: SendPhase,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active conversation id, if one has been assigned.
    pub fn chat_id(&self) -> Option<&ConversationId> {
        self.chat_id.as_ref()
    }

    /// Return the active id, generating one if absent, and mirror it into
    /// the navigable location.
    pub fn ensure_id<N: Navigator>(&mut self, nav: &mut N) -> ConversationId {
        let id = self
            .chat_id
            .get_or_insert_with(|| {
                let id = ConversationId::generate();
                tracing::info!(chat_id = %id, "Started new conversation");
                id
            })
            .clone();
        write_location(nav, Some(&id));
        id
    }

    /// Switch to an existing conversation.
    pub fn set_id<N: Navigator>(&mut self, id: ConversationId, nav: &mut N) {
        write_location(nav, Some(&id));
        self.chat_id = Some(id);
    }

    /// Forget the active conversation (new chat).
    pub fn clear_id<N: Navigator>(&mut self, nav: &mut N) -> Option<ConversationId> {
        write_location(nav, None);
        self.chat_id.take()
    }

    /// Stage a file for the next send, replacing any previous one.
    ///
    /// Returns the attachment that was replaced.
    pub fn stage_attachment(&mut self, attachment: Attachment) -> Option<Attachment> {
        self.pending_attachment.replace(attachment)
    }

    /// The file staged for the next send.
    pub fn pending_attachment(&self) -> Option<&Attachment> {
        self.pending_attachment.as_ref()
    }

    /// Remove and return the staged file.
    pub fn take_attachment(&mut self) -> Option<Attachment> {
        self.pending_attachment.take()
    }
}

fn write_location<N: Navigator>(nav: &mut N, id: Option<&ConversationId>) {
    if let Err(e) = nav.set_chat_id(id.map(ConversationId::as_str)) {
        tracing::warn!("Failed to update location: {}", e);
    }
}
