//! Markdown → styled ratatui lines for the terminal front end.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

const STYLE_CODE_BLOCK: Style = Style::new().fg(Color::DarkGray);
const STYLE_INLINE_CODE: Style = Style::new().fg(Color::Cyan);
const STYLE_HEADING: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const STYLE_BORDER: Style = Style::new().fg(Color::DarkGray);

const QUOTE_PREFIX: &str = "│ ";

#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    prefix: String,
}

impl LineBuilder {
    fn push(&mut self, text: &str, style: Style) {
        if self.current.is_empty() && !self.prefix.is_empty() {
            self.current
                .push(Span::styled(self.prefix.clone(), STYLE_BORDER));
        }
        if !text.is_empty() {
            self.current.push(Span::styled(text.to_string(), style));
        }
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.current)));
        }
    }

    fn newline(&mut self) {
        self.lines.push(Line::from(std::mem::take(&mut self.current)));
    }

    /// Separate blocks with a single blank line.
    fn block_gap(&mut self) {
        self.flush();
        if self.lines.last().is_some_and(|l| l.width() > 0) {
            self.lines.push(Line::default());
        }
    }
}

/// Render markdown to styled lines.
///
/// Partial documents (open fences, half-written lists) render as whatever
/// structure pulldown-cmark recognises so far, so a streamed reply can be
/// re-rendered after every chunk.
pub fn render_markdown(text: &str) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut out = LineBuilder::default();
    let mut style_stack: Vec<Style> = vec![Style::default()];
    let mut in_code_block = false;
    // One entry per open list: next ordinal for ordered lists.
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut link_url: Option<String> = None;
    let mut link_text = String::new();

    let mut in_table = false;
    let mut table_rows: Vec<Vec<String>> = Vec::new();
    let mut current_row: Vec<String> = Vec::new();
    let mut current_cell = String::new();

    for event in Parser::new_ext(text, options) {
        let current = *style_stack.last().unwrap_or(&Style::default());
        match event {
            Event::Start(tag) => match tag {
                Tag::Paragraph => {
                    if lists.is_empty() {
                        out.block_gap();
                    }
                }
                Tag::Heading { .. } => {
                    out.block_gap();
                    style_stack.push(STYLE_HEADING);
                }
                Tag::CodeBlock(_) => {
                    out.block_gap();
                    in_code_block = true;
                    style_stack.push(STYLE_CODE_BLOCK);
                }
                Tag::BlockQuote { .. } => {
                    out.block_gap();
                    out.prefix.push_str(QUOTE_PREFIX);
                }
                Tag::List(start) => {
                    if lists.is_empty() {
                        out.block_gap();
                    } else {
                        out.flush();
                    }
                    lists.push(start);
                }
                Tag::Item => {
                    out.flush();
                    let depth = lists.len().saturating_sub(1);
                    let marker = match lists.last_mut() {
                        Some(Some(n)) => {
                            let marker = format!("{}. ", n);
                            *n += 1;
                            marker
                        }
                        _ => "• ".to_string(),
                    };
                    out.push(&format!("{}{}", "  ".repeat(depth), marker), current);
                }
                Tag::Strong => style_stack.push(current.add_modifier(Modifier::BOLD)),
                Tag::Emphasis => style_stack.push(current.add_modifier(Modifier::ITALIC)),
                Tag::Strikethrough => {
                    style_stack.push(current.add_modifier(Modifier::CROSSED_OUT))
                }
                Tag::Link { dest_url, .. } => {
                    link_url = Some(dest_url.to_string());
                    link_text.clear();
                    style_stack.push(current.fg(Color::Blue).add_modifier(Modifier::UNDERLINED));
                }
                Tag::Table(_) => {
                    out.block_gap();
                    in_table = true;
                    table_rows.clear();
                }
                Tag::TableHead | Tag::TableRow => current_row.clear(),
                Tag::TableCell => current_cell.clear(),
                _ => {}
            },
            Event::End(tag_end) => match tag_end {
                TagEnd::Paragraph => out.flush(),
                TagEnd::Heading(_) => {
                    out.flush();
                    style_stack.pop();
                }
                TagEnd::CodeBlock => {
                    out.flush();
                    in_code_block = false;
                    style_stack.pop();
                }
                TagEnd::BlockQuote { .. } => {
                    out.flush();
                    let keep = out.prefix.len().saturating_sub(QUOTE_PREFIX.len());
                    out.prefix.truncate(keep);
                }
                TagEnd::List(_) => {
                    out.flush();
                    lists.pop();
                }
                TagEnd::Item => out.flush(),
                TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough => {
                    style_stack.pop();
                }
                TagEnd::Link => {
                    style_stack.pop();
                    if let Some(url) = link_url.take() {
                        if link_text != url && !url.is_empty() {
                            out.push(&format!(" ({})", url), STYLE_CODE_BLOCK);
                        }
                    }
                }
                TagEnd::TableCell => current_row.push(std::mem::take(&mut current_cell)),
                TagEnd::TableHead | TagEnd::TableRow => {
                    if !current_row.is_empty() {
                        table_rows.push(std::mem::take(&mut current_row));
                    }
                }
                TagEnd::Table => {
                    render_table(&table_rows, &mut out.lines);
                    in_table = false;
                    table_rows.clear();
                }
                _ => {}
            },
            Event::Text(content) => {
                if link_url.is_some() {
                    link_text.push_str(&content);
                }
                if in_table {
                    current_cell.push_str(&content);
                } else if in_code_block {
                    // Code keeps its line structure; a trailing newline closes the line.
                    let mut parts = content.split('\n').peekable();
                    while let Some(part) = parts.next() {
                        if parts.peek().is_none() && part.is_empty() {
                            break;
                        }
                        out.push(&format!("  {}", part), current);
                        if parts.peek().is_some() {
                            out.newline();
                        }
                    }
                } else {
                    for (i, part) in content.split('\n').enumerate() {
                        if i > 0 {
                            out.newline();
                        }
                        out.push(part, current);
                    }
                }
            }
            Event::Code(code) => {
                if in_table {
                    current_cell.push_str(&code);
                } else {
                    out.push(&code, STYLE_INLINE_CODE);
                }
            }
            Event::Html(raw) | Event::InlineHtml(raw) => {
                if in_table {
                    current_cell.push_str(&raw);
                } else {
                    for (i, part) in raw.trim_end_matches('\n').split('\n').enumerate() {
                        if i > 0 {
                            out.newline();
                        }
                        out.push(part, current);
                    }
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if in_table {
                    current_cell.push(' ');
                } else {
                    out.newline();
                }
            }
            Event::Rule => {
                out.block_gap();
                out.push(&"─".repeat(24), STYLE_BORDER);
                out.flush();
            }
            Event::TaskListMarker(done) => {
                out.push(if done { "[x] " } else { "[ ] " }, current);
            }
            _ => {}
        }
    }

    out.flush();
    out.lines
}

fn render_table(rows: &[Vec<String>], lines: &mut Vec<Line<'static>>) {
    let cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    if cols == 0 {
        return;
    }

    let mut widths = vec![3usize; cols];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.trim().width());
        }
    }

    let border = |left: char, mid: char, right: char| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        Line::styled(
            format!("{}{}{}", left, segments.join(&mid.to_string()), right),
            STYLE_BORDER,
        )
    };

    lines.push(border('┌', '┬', '┐'));
    for (row_idx, row) in rows.iter().enumerate() {
        let style = if row_idx == 0 {
            STYLE_HEADING
        } else {
            Style::default()
        };
        let mut spans = vec![Span::styled("│", STYLE_BORDER)];
        for (col, width) in widths.iter().enumerate() {
            let content = row.get(col).map(|c| c.trim()).unwrap_or("");
            let pad = width.saturating_sub(content.width());
            spans.push(Span::styled(format!(" {}{} ", content, " ".repeat(pad)), style));
            spans.push(Span::styled("│", STYLE_BORDER));
        }
        lines.push(Line::from(spans));
        if row_idx == 0 && rows.len() > 1 {
            lines.push(border('├', '┼', '┤'));
        }
    }
    lines.push(border('└', '┴', '┘'));
}

/// Number of terminal rows `lines` occupy when wrapped at `width` columns.
///
/// Each line takes `ceil(display_width / width)` rows; blank lines take one.
pub fn wrapped_line_count(lines: &[Line], width: u16) -> usize {
    if width == 0 {
        return lines.len();
    }
    let width = usize::from(width);
    lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum()
}
