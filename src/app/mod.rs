//! Chat controller.
//!
//! [`ChatApp`] owns the API client, the view, the navigator and the session
//! state. After [`ChatApp::init`], [`ChatApp::handle`] is the only entry
//! point; the caller awaits each event before dispatching the next, so
//! handlers never interleave.

mod events;
mod send;
mod sync;

pub use events::UiEvent;
pub use sync::NO_CONVERSATIONS;

use crate::api::ChatApiClient;
use crate::config::ClientConfig;
use crate::error::ChatResult;
use crate::models::ConversationId;
use crate::render::Formatter;
use crate::state::SessionState;
use crate::traits::{ChatView, HttpClient, Navigator};

/// Title shown for a conversation that has no messages yet.
pub const NEW_CHAT_TITLE: &str = "New chat";

pub struct ChatApp<C: HttpClient, V: ChatView, N: Navigator> {
    api: ChatApiClient<C>,
    view: V,
    navigator: N,
    formatter: Box<dyn Formatter>,
    session: SessionState,
    config: ClientConfig,
}

impl<C: HttpClient, V: ChatView, N: Navigator> ChatApp<C, V, N> {
    pub fn new(
        http: C,
        view: V,
        navigator: N,
        formatter: Box<dyn Formatter>,
        config: ClientConfig,
    ) -> Self {
        Self {
            api: ChatApiClient::new(config.api_base_url.clone(), http),
            view,
            navigator,
            formatter,
            session: SessionState::new(),
            config,
        }
    }

    /// Restore the conversation named by the location, then load the sidebar.
    pub async fn init(&mut self) -> ChatResult<()> {
        match self.navigator.chat_id() {
            Some(id) => {
                if let Err(e) = self.select_chat(&id).await {
                    // Never saved server-side, or gone. Keep the id so the next
                    // send continues it.
                    tracing::warn!(chat_id = %id, "Could not restore conversation: {}", e);
                    self.session
                        .set_id(ConversationId::from(id), &mut self.navigator);
                    self.view.clear_messages();
                    self.view.show_welcome();
                    self.view.set_title(NEW_CHAT_TITLE);
                }
            }
            None => self.start_fresh(),
        }
        self.sync_chat_list().await
    }

    /// Dispatch one UI event.
    pub async fn handle(&mut self, event: UiEvent) -> ChatResult<()> {
        match event {
            UiEvent::Send(text) => self.send(&text).await,
            UiEvent::Attach(attachment) => {
                tracing::info!(
                    file = %attachment.file_name,
                    bytes = attachment.size(),
                    "Staged attachment"
                );
                self.view.show_attachment(&attachment.file_name);
                self.session.stage_attachment(attachment);
                Ok(())
            }
            UiEvent::RemoveAttachment => {
                self.session.take_attachment();
                self.view.clear_attachment();
                Ok(())
            }
            UiEvent::SelectChat(id) => self.select_chat(&id).await,
            UiEvent::NewChat => {
                self.new_chat().await;
                Ok(())
            }
            UiEvent::RefreshChats => self.sync_chat_list().await,
        }
    }

    /// Start a new conversation, asking the backend to forget the old one.
    pub async fn new_chat(&mut self) {
        let previous = self.session.clear_id(&mut self.navigator);
        if let Some(id) = previous {
            tracing::info!(chat_id = %id, "Leaving conversation");
            if self.config.reset_on_new_chat {
                self.api.reset(id.as_str()).await;
            }
        }
        self.start_fresh();
    }

    /// Clear the pane and show the welcome state without touching the backend.
    fn start_fresh(&mut self) {
        self.session.clear_id(&mut self.navigator);
        self.view.clear_messages();
        self.view.show_welcome();
        self.view.set_title(NEW_CHAT_TITLE);
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &ChatApiClient<C> {
        &self.api
    }
}
