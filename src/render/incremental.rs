use std::time::Duration;

use super::{Formatter, Spacer, APOLOGY};
use crate::stream::Accumulator;
use crate::traits::{ChatView, NodeId};

/// Drives one assistant bubble through a streamed reply.
///
/// Each chunk re-renders the whole accumulated text into the bubble, then
/// shrinks the spacer by the bubble's new height.
pub struct IncrementalRenderer<'f> {
    formatter: &'f dyn Formatter,
    node: NodeId,
    spacer: Spacer,
    text: Accumulator,
}

impl<'f> IncrementalRenderer<'f> {
    /// Bind to `node` and insert the spacer below it.
    pub fn start<V: ChatView + ?Sized>(
        view: &mut V,
        formatter: &'f dyn Formatter,
        node: NodeId,
        gap: u32,
    ) -> Self {
        let spacer = Spacer::insert(view, gap);
        Self {
            formatter,
            node,
            spacer,
            text: Accumulator::new(),
        }
    }

    /// Append a decoded chunk and redraw.
    pub fn push<V: ChatView + ?Sized>(&mut self, view: &mut V, chunk: &str) {
        let full = self.text.push(chunk);
        let formatted = self.formatter.format(full);
        view.set_content(self.node, &formatted);
        let height = view.node_height(self.node);
        self.spacer.update(view, height);
    }

    /// Replace whatever was rendered with the apology text.
    pub fn fail<V: ChatView + ?Sized>(&mut self, view: &mut V) {
        view.set_content(self.node, &self.formatter.plain(APOLOGY));
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn spacer(&self) -> &Spacer {
        &self.spacer
    }

    /// Collapse the spacer and hand back the accumulated reply.
    pub async fn finish<V: ChatView + ?Sized>(self, view: &mut V, collapse: Duration) -> String {
        self.spacer.collapse(view, collapse).await;
        self.text.into_string()
    }
}
