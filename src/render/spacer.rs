use std::time::Duration;

use crate::traits::ChatView;

/// Layout placeholder below a streaming reply.
///
/// Starts at `container − gap` and shrinks by exactly as much as the reply
/// grows, so total layout height stays constant and the viewport does not
/// jump while chunks arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spacer {
    initial: u32,
    height: u32,
}

impl Spacer {
    /// Insert a spacer sized to the visible container minus `gap`.
    pub fn insert<V: ChatView + ?Sized>(view: &mut V, gap: u32) -> Self {
        let initial = view.container_height().saturating_sub(gap);
        view.insert_spacer(initial);
        tracing::trace!(height = initial, "Inserted spacer");
        Self {
            initial,
            height: initial,
        }
    }

    /// Height the spacer should have when the reply is `content_height` tall.
    pub fn height_for(&self, content_height: u32) -> u32 {
        self.initial.saturating_sub(content_height)
    }

    /// Resize for the reply's current height. Returns the new height.
    pub fn update<V: ChatView + ?Sized>(&mut self, view: &mut V, content_height: u32) -> u32 {
        let height = self.height_for(content_height);
        if height != self.height {
            self.height = height;
            view.set_spacer_height(height);
        }
        height
    }

    pub fn initial(&self) -> u32 {
        self.initial
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Animate to zero over `duration`, then remove the element.
    pub async fn collapse<V: ChatView + ?Sized>(mut self, view: &mut V, duration: Duration) {
        view.collapse_spacer(duration);
        self.height = 0;
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
        view.remove_spacer();
    }
}
