//! Frame layout: title bar, message pane or chat list, status line, prompt.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::input::InputLine;
use super::view::Screen;
use crate::render::wrapped_line_count;

pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);
pub const STYLE_USER: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
pub const STYLE_ASSISTANT: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const STYLE_TITLE: Style = Style::new().add_modifier(Modifier::REVERSED);
const STYLE_ACTIVE: Style = Style::new().add_modifier(Modifier::BOLD);

const PROMPT: &str = "> ";

/// Draw the whole screen.
pub fn render(frame: &mut Frame, screen: &Screen, input: &InputLine) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(1),    // Messages or chat list
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Prompt
        ])
        .split(frame.area());

    render_title(frame, chunks[0], screen);
    if screen.showing_list {
        render_chat_list(frame, chunks[1], screen);
    } else {
        render_messages(frame, chunks[1], screen);
    }
    render_status(frame, chunks[2], screen);
    render_prompt(frame, chunks[3], input);
}

fn render_title(frame: &mut Frame, area: Rect, screen: &Screen) {
    let mut spans = vec![Span::styled(format!(" {} ", screen.title), STYLE_TITLE)];
    if let Some(file) = &screen.attachment {
        spans.push(Span::styled(format!(" [attached: {}]", file), STYLE_DIM));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Newest lines stay in view: the paragraph is scrolled to its bottom.
fn render_messages(frame: &mut Frame, area: Rect, screen: &Screen) {
    let lines = screen.pane_lines();
    let total = wrapped_line_count(&lines, area.width);
    let scroll = total.saturating_sub(usize::from(area.height));
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);

    let messages = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(messages, area);
}

fn render_chat_list(frame: &mut Frame, area: Rect, screen: &Screen) {
    let mut items = vec![ListItem::new(Line::styled("Conversations", STYLE_ACTIVE))];
    if let Some(banner) = &screen.banner {
        items.push(ListItem::new(Line::styled(banner.clone(), STYLE_DIM)));
    }
    for (i, chat) in screen.chats.iter().enumerate() {
        let is_active = screen.active.as_deref() == Some(chat.id.as_str());
        let marker = if is_active { "*" } else { " " };
        let style = if is_active { STYLE_ACTIVE } else { Style::default() };
        let mut spans = vec![Span::styled(
            format!("{} {:>2}. {}", marker, i + 1, chat.display_title()),
            style,
        )];
        if let Some(updated) = chat.updated_at {
            spans.push(Span::styled(
                format!("  {}", updated.format("%Y-%m-%d %H:%M")),
                STYLE_DIM,
            ));
        }
        items.push(ListItem::new(Line::from(spans)));
    }
    frame.render_widget(List::new(items), area);
}

fn render_status(frame: &mut Frame, area: Rect, screen: &Screen) {
    if let Some(status) = &screen.status {
        frame.render_widget(Paragraph::new(Line::styled(status.clone(), STYLE_DIM)), area);
    }
}

fn render_prompt(frame: &mut Frame, area: Rect, input: &InputLine) {
    let line = Line::from(vec![Span::raw(PROMPT), Span::raw(input.as_str().to_string())]);
    frame.render_widget(Paragraph::new(line), area);

    let column = (PROMPT.len() as u16).saturating_add(input.cursor_column());
    let x = area.x + column.min(area.width.saturating_sub(1));
    frame.set_cursor_position((x, area.y));
}
