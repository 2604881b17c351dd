//! Prompt line editing over crossterm key events.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use unicode_width::UnicodeWidthStr;

/// What a key press asks the event loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Nothing beyond redrawing the prompt
    None,
    /// Enter was pressed; the line is handed over and the prompt cleared
    Submit(String),
    /// Ctrl+C, or Ctrl+D on an empty prompt
    Quit,
    /// Esc: leave the chat list
    Back,
}

/// Single-line input buffer with a cursor.
#[derive(Debug, Default, Clone)]
pub struct InputLine {
    text: String,
    /// Byte offset, always on a char boundary
    cursor: usize,
}

impl InputLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Display columns before the cursor.
    pub fn cursor_column(&self) -> u16 {
        self.text[..self.cursor].width().min(u16::MAX as usize) as u16
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert pasted text, folding newlines into spaces.
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            self.insert(if c == '\n' || c == '\r' { ' ' } else { c });
        }
    }

    pub fn backspace(&mut self) {
        if let Some((idx, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.text.remove(idx);
            self.cursor = idx;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some((idx, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Take the line and reset the prompt.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Apply one key event.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.kind != KeyEventKind::Press {
            return KeyAction::None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => KeyAction::Quit,
            KeyCode::Char('d') if ctrl && self.text.is_empty() => KeyAction::Quit,
            KeyCode::Char('u') if ctrl => {
                self.take();
                KeyAction::None
            }
            KeyCode::Char(c) if !ctrl => {
                self.insert(c);
                KeyAction::None
            }
            KeyCode::Enter => KeyAction::Submit(self.take()),
            KeyCode::Backspace => {
                self.backspace();
                KeyAction::None
            }
            KeyCode::Delete => {
                self.delete();
                KeyAction::None
            }
            KeyCode::Left => {
                self.move_left();
                KeyAction::None
            }
            KeyCode::Right => {
                self.move_right();
                KeyAction::None
            }
            KeyCode::Home => {
                self.cursor = 0;
                KeyAction::None
            }
            KeyCode::End => {
                self.cursor = self.text.len();
                KeyAction::None
            }
            KeyCode::Esc => KeyAction::Back,
            _ => KeyAction::None,
        }
    }
}
