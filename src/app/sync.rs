//! Sidebar synchronization and conversation selection.

use super::ChatApp;
use crate::error::ChatResult;
use crate::models::{ConversationId, Role};
use crate::traits::{ChatView, HttpClient, Navigator};

/// Banner shown when the backend has no conversations.
pub const NO_CONVERSATIONS: &str = "No conversations yet";

impl<C: HttpClient, V: ChatView, N: Navigator> ChatApp<C, V, N> {
    /// Fetch every conversation and rebuild the sidebar.
    ///
    /// An empty list shows the banner. It also starts a fresh conversation,
    /// unless one is already active: a chat the backend has not stored yet
    /// keeps its id and its bubbles.
    pub async fn sync_chat_list(&mut self) -> ChatResult<()> {
        let chats = self.api.fetch_chats().await?;
        tracing::debug!(count = chats.len(), "Fetched chat list");

        if chats.is_empty() {
            self.view.show_banner(NO_CONVERSATIONS);
            if self.session.chat_id().is_none() {
                self.start_fresh();
            }
            return Ok(());
        }

        self.view.render_chat_list(&chats);
        self.mark_active();
        Ok(())
    }

    /// Load a conversation's history into the pane and make it active.
    pub async fn select_chat(&mut self, chat_id: &str) -> ChatResult<()> {
        let detail = self.api.fetch_chat(chat_id).await?;
        tracing::info!(%chat_id, messages = detail.messages.len(), "Opened conversation");

        self.session
            .set_id(ConversationId::from(chat_id), &mut self.navigator);
        self.view.clear_messages();

        let mut rendered = 0;
        for message in detail.visible_messages() {
            let content = match message.role {
                Role::Assistant => self.formatter.format(&message.content),
                _ => self.formatter.plain(&message.content),
            };
            self.view.render_message(message.role, &content);
            rendered += 1;
        }
        if rendered == 0 {
            self.view.show_welcome();
        } else {
            self.view.hide_welcome();
        }

        self.view.set_title(detail.display_title());
        self.mark_active();
        Ok(())
    }

    /// Highlight the active conversation in the sidebar, if it is listed.
    fn mark_active(&mut self) {
        let Some(id) = self.session.chat_id() else {
            return;
        };
        if let Err(e) = self.view.set_active(id.as_str()) {
            tracing::warn!(chat_id = %id, "Could not mark chat active: {}", e);
        }
    }
}
