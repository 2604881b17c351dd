//! The send flow: one user message in, one streamed reply rendered.

use futures_util::StreamExt;

use super::ChatApp;
use crate::error::{ChatError, ChatResult};
use crate::models::Role;
use crate::render::IncrementalRenderer;
use crate::stream::text_chunks;
use crate::traits::{ChatView, HttpClient, Navigator};

impl<C: HttpClient, V: ChatView, N: Navigator> ChatApp<C, V, N> {
    /// Send `text` in the active conversation and stream the reply.
    ///
    /// Surrounding whitespace is trimmed and blank input is ignored. A
    /// transport failure replaces the reply with
    /// the apology and is not returned; the only error is
    /// [`ChatError::SendInProgress`].
    pub async fn send(&mut self, text: &str) -> ChatResult<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        self.session.phase.begin_send()?;

        let chat_id = self.session.ensure_id(&mut self.navigator);
        tracing::info!(%chat_id, chars = text.chars().count(), "Sending message");

        self.view.hide_welcome();
        self.view
            .render_message(Role::User, &self.formatter.plain(text));
        let node = self.view.render_message(Role::Assistant, "");
        let mut renderer =
            IncrementalRenderer::start(&mut self.view, &*self.formatter, node, self.config.spacer_gap);

        let attachment = self.session.take_attachment();
        let response = self
            .api
            .stream_chat(chat_id.as_str(), text, attachment)
            .await;
        self.view.clear_attachment();

        let outcome = match response {
            Ok(body) => {
                let mut chunks = std::pin::pin!(text_chunks(body));
                let mut outcome = Ok(());
                while let Some(item) = chunks.next().await {
                    match item {
                        Ok(chunk) => {
                            self.session.phase.on_chunk();
                            tracing::debug!(%chat_id, len = chunk.len(), "Received chunk");
                            renderer.push(&mut self.view, &chunk);
                        }
                        Err(e) => {
                            outcome = Err(ChatError::from(e));
                            break;
                        }
                    }
                }
                outcome
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => {
                self.session.phase.finish();
                tracing::info!(%chat_id, bytes = renderer.text().len(), "Reply complete");
            }
            Err(e) => {
                tracing::error!(%chat_id, code = e.error_code(), "Send failed: {}", e);
                renderer.fail(&mut self.view);
                self.session.phase.fail();
            }
        }

        renderer
            .finish(&mut self.view, self.config.spacer_collapse)
            .await;

        // The backend stores the title after the reply; give it a moment.
        tokio::time::sleep(self.config.list_refresh_delay).await;
        if let Err(e) = self.sync_chat_list().await {
            tracing::warn!("Chat list refresh failed: {}", e);
        }
        Ok(())
    }
}
