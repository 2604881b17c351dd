//! Screen state behind the terminal front end.
//!
//! [`Screen`] holds everything the ratatui frame shows: the title bar, the
//! message pane (or the chat list), and the status line. It implements
//! [`ChatView`] directly. [`TerminalView`] is a cloneable handle to one
//! shared screen, so the controller task writes to it while the event loop
//! draws it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use ratatui::text::Line;

use super::ui::{STYLE_ASSISTANT, STYLE_DIM, STYLE_USER};
use crate::error::ViewError;
use crate::models::{ChatSummary, Role};
use crate::render::{render_markdown, wrapped_line_count};
use crate::traits::{ChatView, NodeId};

/// Greeting shown for an empty conversation.
pub const WELCOME: &str = "Ask anything to start a conversation. Type /help for commands.";

/// Title bar, status line, prompt.
pub const CHROME_ROWS: u16 = 3;

/// One message bubble and its rendered lines.
#[derive(Debug, Clone)]
pub struct Bubble {
    pub role: Role,
    pub content: String,
    pub lines: Vec<Line<'static>>,
}

impl Bubble {
    fn new(role: Role, content: &str) -> Self {
        let mut bubble = Self {
            role,
            content: String::new(),
            lines: Vec::new(),
        };
        bubble.set(content);
        bubble
    }

    /// Assistant text is markdown; everything else is shown as typed.
    fn set(&mut self, content: &str) {
        self.content = content.to_string();
        self.lines = match self.role {
            _ if content.is_empty() => Vec::new(),
            Role::Assistant => render_markdown(content),
            _ => content
                .split('\n')
                .map(|line| Line::from(line.to_string()))
                .collect(),
        };
    }
}

#[derive(Debug)]
pub struct Screen {
    width: u16,
    height: u16,
    pub title: String,
    pub bubbles: Vec<Bubble>,
    pub welcome: bool,
    pub spacer: Option<u32>,
    pub chats: Vec<ChatSummary>,
    pub active: Option<String>,
    pub banner: Option<String>,
    pub attachment: Option<String>,
    pub status: Option<String>,
    pub showing_list: bool,
    dirty: bool,
}

impl Screen {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            title: String::new(),
            bubbles: Vec::new(),
            welcome: false,
            spacer: None,
            chats: Vec::new(),
            active: None,
            banner: None,
            attachment: None,
            status: None,
            showing_list: false,
            dirty: true,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.dirty = true;
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Whether anything changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// One-line message under the pane; `None` clears it.
    pub fn set_status(&mut self, status: Option<&str>) {
        self.status = status.map(str::to_string);
        self.dirty = true;
    }

    /// Show the conversation list in place of the messages.
    pub fn show_list(&mut self) {
        self.showing_list = true;
        self.dirty = true;
    }

    /// Show the messages again.
    pub fn show_messages(&mut self) {
        if self.showing_list {
            self.showing_list = false;
            self.dirty = true;
        }
    }

    /// The conversation at a 1-based list position.
    pub fn chat_at(&self, position: usize) -> Option<&ChatSummary> {
        position.checked_sub(1).and_then(|i| self.chats.get(i))
    }

    /// Print a block of text in the pane, replacing the list.
    pub fn show_notice(&mut self, text: &str) {
        self.showing_list = false;
        self.status = None;
        self.bubbles.push(Bubble::new(Role::Other, text));
        self.dirty = true;
    }

    /// Rows available to the message pane.
    pub fn pane_rows(&self) -> u16 {
        self.height.saturating_sub(CHROME_ROWS)
    }

    /// Every line of the message pane, spacer rows included.
    pub fn pane_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        if self.welcome {
            lines.push(Line::styled(WELCOME, STYLE_DIM));
            lines.push(Line::default());
        }
        for bubble in &self.bubbles {
            match bubble.role {
                Role::User => lines.push(Line::styled("you", STYLE_USER)),
                Role::Assistant => lines.push(Line::styled("assistant", STYLE_ASSISTANT)),
                _ => {}
            }
            lines.extend(bubble.lines.iter().cloned());
            lines.push(Line::default());
        }
        if let Some(rows) = self.spacer {
            lines.extend(std::iter::repeat(Line::default()).take(rows as usize));
        }
        lines
    }
}

impl ChatView for Screen {
    fn render_message(&mut self, role: Role, content: &str) -> NodeId {
        self.showing_list = false;
        self.bubbles.push(Bubble::new(role, content));
        self.dirty = true;
        self.bubbles.len() - 1
    }

    fn set_content(&mut self, node: NodeId, content: &str) {
        match self.bubbles.get_mut(node) {
            Some(bubble) => bubble.set(content),
            None => {
                tracing::warn!(node, "set_content on unknown bubble");
                return;
            }
        }
        self.dirty = true;
    }

    fn node_height(&self, node: NodeId) -> u32 {
        self.bubbles
            .get(node)
            .map(|b| wrapped_line_count(&b.lines, self.width) as u32)
            .unwrap_or(0)
    }

    fn container_height(&self) -> u32 {
        u32::from(self.pane_rows())
    }

    fn clear_messages(&mut self) {
        self.bubbles.clear();
        self.spacer = None;
        self.dirty = true;
    }

    fn show_welcome(&mut self) {
        self.welcome = true;
        self.dirty = true;
    }

    fn hide_welcome(&mut self) {
        self.welcome = false;
        self.dirty = true;
    }

    fn insert_spacer(&mut self, height: u32) {
        self.spacer = Some(height);
        self.dirty = true;
    }

    fn set_spacer_height(&mut self, height: u32) {
        if self.spacer.is_some() {
            self.spacer = Some(height);
            self.dirty = true;
        }
    }

    fn collapse_spacer(&mut self, _duration: Duration) {
        // No animation in a terminal: drop to zero at once.
        self.set_spacer_height(0);
    }

    fn remove_spacer(&mut self) {
        self.spacer = None;
        self.dirty = true;
    }

    fn render_chat_list(&mut self, chats: &[ChatSummary]) {
        self.chats = chats.to_vec();
        self.banner = None;
        self.active = None;
        self.dirty = true;
    }

    fn set_active(&mut self, chat_id: &str) -> Result<(), ViewError> {
        if !self.chats.iter().any(|c| c.id == chat_id) {
            return Err(ViewError::MissingTarget {
                target: format!("chat list item {}", chat_id),
            });
        }
        self.active = Some(chat_id.to_string());
        self.dirty = true;
        Ok(())
    }

    fn show_banner(&mut self, text: &str) {
        self.chats.clear();
        self.active = None;
        self.banner = Some(text.to_string());
        self.dirty = true;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.dirty = true;
    }

    fn show_attachment(&mut self, file_name: &str) {
        self.attachment = Some(file_name.to_string());
        self.dirty = true;
    }

    fn clear_attachment(&mut self) {
        self.attachment = None;
        self.dirty = true;
    }
}

/// Shared handle to a [`Screen`].
///
/// The lock is only held inside single calls, never across an await.
#[derive(Debug, Clone)]
pub struct TerminalView {
    screen: Arc<Mutex<Screen>>,
}

impl TerminalView {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            screen: Arc::new(Mutex::new(Screen::new(width, height))),
        }
    }

    /// Lock the screen. A panic elsewhere cannot leave it half-written, so
    /// a poisoned lock is still usable.
    pub fn lock(&self) -> MutexGuard<'_, Screen> {
        self.screen.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ChatView for TerminalView {
    fn render_message(&mut self, role: Role, content: &str) -> NodeId {
        self.lock().render_message(role, content)
    }

    fn set_content(&mut self, node: NodeId, content: &str) {
        self.lock().set_content(node, content)
    }

    fn node_height(&self, node: NodeId) -> u32 {
        self.lock().node_height(node)
    }

    fn container_height(&self) -> u32 {
        self.lock().container_height()
    }

    fn clear_messages(&mut self) {
        self.lock().clear_messages()
    }

    fn show_welcome(&mut self) {
        self.lock().show_welcome()
    }

    fn hide_welcome(&mut self) {
        self.lock().hide_welcome()
    }

    fn insert_spacer(&mut self, height: u32) {
        self.lock().insert_spacer(height)
    }

    fn set_spacer_height(&mut self, height: u32) {
        self.lock().set_spacer_height(height)
    }

    fn collapse_spacer(&mut self, duration: Duration) {
        self.lock().collapse_spacer(duration)
    }

    fn remove_spacer(&mut self) {
        self.lock().remove_spacer()
    }

    fn render_chat_list(&mut self, chats: &[ChatSummary]) {
        self.lock().render_chat_list(chats)
    }

    fn set_active(&mut self, chat_id: &str) -> Result<(), ViewError> {
        self.lock().set_active(chat_id)
    }

    fn show_banner(&mut self, text: &str) {
        self.lock().show_banner(text)
    }

    fn set_title(&mut self, title: &str) {
        self.lock().set_title(title)
    }

    fn show_attachment(&mut self, file_name: &str) {
        self.lock().show_attachment(file_name)
    }

    fn clear_attachment(&mut self) {
        self.lock().clear_attachment()
    }
}
