//! View-update interface.
//!
//! [`ChatView`] is the only way the controller touches the screen. The
//! terminal front end implements it over a ratatui screen; tests use
//! [`crate::adapters::mock::RecordingView`].

use std::time::Duration;

use crate::error::ViewError;
use crate::models::{ChatSummary, Role};

/// Handle to a rendered message bubble.
pub type NodeId = usize;

/// Capability set the controller needs from a chat surface.
///
/// Heights are in the view's own units (pixels for a page, rows for a
/// terminal). The renderer only compares them with each other.
pub trait ChatView {
    /// Append a message bubble with already formatted content.
    fn render_message(&mut self, role: Role, content: &str) -> NodeId;

    /// Replace the content of an existing bubble.
    fn set_content(&mut self, node: NodeId, content: &str);

    /// Current rendered height of a bubble. Unknown nodes measure zero.
    fn node_height(&self, node: NodeId) -> u32;

    /// Visible height of the message container.
    fn container_height(&self) -> u32;

    /// Remove every bubble from the message pane.
    fn clear_messages(&mut self);

    /// Show the greeting shown for a conversation with no messages.
    fn show_welcome(&mut self);

    /// Remove the greeting, if shown.
    fn hide_welcome(&mut self);

    /// Insert the layout spacer below the newest bubble.
    fn insert_spacer(&mut self, height: u32);

    /// Resize the spacer.
    fn set_spacer_height(&mut self, height: u32);

    /// Start animating the spacer to zero height over `duration`.
    fn collapse_spacer(&mut self, duration: Duration);

    /// Remove the spacer element.
    fn remove_spacer(&mut self);

    /// Rebuild the conversation sidebar.
    fn render_chat_list(&mut self, chats: &[ChatSummary]);

    /// Mark one sidebar item active and every other item inactive.
    fn set_active(&mut self, chat_id: &str) -> Result<(), ViewError>;

    /// Show an informational banner in the sidebar.
    fn show_banner(&mut self, text: &str);

    /// Set the window or page title.
    fn set_title(&mut self, title: &str);

    /// Show the pending-attachment indicator.
    fn show_attachment(&mut self, file_name: &str);

    /// Hide the pending-attachment indicator.
    fn clear_attachment(&mut self);
}
