//! Recording view for testing.
//!
//! Keeps an in-memory model of the chat surface and a log of every call,
//! so tests can assert both final state and ordering.

use std::time::Duration;

use crate::error::ViewError;
use crate::models::{ChatSummary, Role};
use crate::traits::{ChatView, NodeId};

/// Default visible container height.
pub const DEFAULT_CONTAINER_HEIGHT: u32 = 600;
/// Height of one content line.
pub const DEFAULT_LINE_HEIGHT: u32 = 20;

/// One call made against the view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    MessageRendered { node: NodeId, role: Role, content: String },
    ContentSet { node: NodeId, content: String },
    MessagesCleared,
    WelcomeShown,
    WelcomeHidden,
    SpacerInserted(u32),
    SpacerResized(u32),
    SpacerCollapsed(Duration),
    SpacerRemoved,
    ChatListRendered(Vec<String>),
    ActiveSet(String),
    BannerShown(String),
    TitleSet(String),
    AttachmentShown(String),
    AttachmentCleared,
}

/// A rendered bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub role: Role,
    pub content: String,
}

/// In-memory [`ChatView`].
#[derive(Debug, Clone)]
pub struct RecordingView {
    pub bubbles: Vec<Bubble>,
    pub welcome_visible: bool,
    pub spacer: Option<u32>,
    pub chat_items: Vec<String>,
    pub active: Option<String>,
    pub banner: Option<String>,
    pub title: Option<String>,
    pub attachment: Option<String>,
    pub events: Vec<ViewEvent>,
    container_height: u32,
    line_height: u32,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_CONTAINER_HEIGHT, DEFAULT_LINE_HEIGHT)
    }

    pub fn with_dimensions(container_height: u32, line_height: u32) -> Self {
        Self {
            bubbles: Vec::new(),
            welcome_visible: false,
            spacer: None,
            chat_items: Vec::new(),
            active: None,
            banner: None,
            title: None,
            attachment: None,
            events: Vec::new(),
            container_height,
            line_height,
        }
    }

    /// Content of every bubble with `role`, in order.
    pub fn contents_of(&self, role: Role) -> Vec<&str> {
        self.bubbles
            .iter()
            .filter(|b| b.role == role)
            .map(|b| b.content.as_str())
            .collect()
    }

    /// Every content the given node has shown, in order.
    pub fn content_history(&self, node: NodeId) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ViewEvent::MessageRendered { node: n, content, .. }
                | ViewEvent::ContentSet { node: n, content }
                    if *n == node =>
                {
                    Some(content.as_str())
                }
                _ => None,
            })
            .collect()
    }

    /// Every height the spacer was given, in order.
    pub fn spacer_heights(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ViewEvent::SpacerInserted(h) | ViewEvent::SpacerResized(h) => Some(*h),
                _ => None,
            })
            .collect()
    }

    /// Index of the first event matching `pred`.
    pub fn position(&self, pred: impl Fn(&ViewEvent) -> bool) -> Option<usize> {
        self.events.iter().position(pred)
    }

    fn measure(&self, content: &str) -> u32 {
        if content.is_empty() {
            0
        } else {
            content.lines().count().max(1) as u32 * self.line_height
        }
    }
}

impl Default for RecordingView {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatView for RecordingView {
    fn render_message(&mut self, role: Role, content: &str) -> NodeId {
        let node = self.bubbles.len();
        self.bubbles.push(Bubble {
            role,
            content: content.to_string(),
        });
        self.events.push(ViewEvent::MessageRendered {
            node,
            role,
            content: content.to_string(),
        });
        node
    }

    fn set_content(&mut self, node: NodeId, content: &str) {
        if let Some(bubble) = self.bubbles.get_mut(node) {
            bubble.content = content.to_string();
        }
        self.events.push(ViewEvent::ContentSet {
            node,
            content: content.to_string(),
        });
    }

    fn node_height(&self, node: NodeId) -> u32 {
        self.bubbles
            .get(node)
            .map(|b| self.measure(&b.content))
            .unwrap_or(0)
    }

    fn container_height(&self) -> u32 {
        self.container_height
    }

    fn clear_messages(&mut self) {
        self.bubbles.clear();
        self.events.push(ViewEvent::MessagesCleared);
    }

    fn show_welcome(&mut self) {
        self.welcome_visible = true;
        self.events.push(ViewEvent::WelcomeShown);
    }

    fn hide_welcome(&mut self) {
        self.welcome_visible = false;
        self.events.push(ViewEvent::WelcomeHidden);
    }

    fn insert_spacer(&mut self, height: u32) {
        self.spacer = Some(height);
        self.events.push(ViewEvent::SpacerInserted(height));
    }

    fn set_spacer_height(&mut self, height: u32) {
        if self.spacer.is_some() {
            self.spacer = Some(height);
        }
        self.events.push(ViewEvent::SpacerResized(height));
    }

    fn collapse_spacer(&mut self, duration: Duration) {
        if self.spacer.is_some() {
            self.spacer = Some(0);
        }
        self.events.push(ViewEvent::SpacerCollapsed(duration));
    }

    fn remove_spacer(&mut self) {
        self.spacer = None;
        self.events.push(ViewEvent::SpacerRemoved);
    }

    fn render_chat_list(&mut self, chats: &[ChatSummary]) {
        self.chat_items = chats.iter().map(|c| c.id.clone()).collect();
        self.banner = None;
        self.active = None;
        self.events
            .push(ViewEvent::ChatListRendered(self.chat_items.clone()));
    }

    fn set_active(&mut self, chat_id: &str) -> Result<(), ViewError> {
        if !self.chat_items.iter().any(|id| id == chat_id) {
            return Err(ViewError::MissingTarget {
                target: format!("chat item {}", chat_id),
            });
        }
        self.active = Some(chat_id.to_string());
        self.events.push(ViewEvent::ActiveSet(chat_id.to_string()));
        Ok(())
    }

    fn show_banner(&mut self, text: &str) {
        self.chat_items.clear();
        self.active = None;
        self.banner = Some(text.to_string());
        self.events.push(ViewEvent::BannerShown(text.to_string()));
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
        self.events.push(ViewEvent::TitleSet(title.to_string()));
    }

    fn show_attachment(&mut self, file_name: &str) {
        self.attachment = Some(file_name.to_string());
        self.events
            .push(ViewEvent::AttachmentShown(file_name.to_string()));
    }

    fn clear_attachment(&mut self) {
        self.attachment = None;
        self.events.push(ViewEvent::AttachmentCleared);
    }
}
