use pulldown_cmark::{html, Event, Options, Parser};

use super::Formatter;

/// Markdown → HTML via pulldown-cmark.
///
/// Raw HTML in the source is escaped and shown as text; replies come from a
/// model and must not inject markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormatter;

impl HtmlFormatter {
    fn options() -> Options {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options
    }
}

impl Formatter for HtmlFormatter {
    fn format(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Self::options()).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }

    fn plain(&self, text: &str) -> String {
        escape_html(text)
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = HtmlFormatter.format("Hi **there**");
        assert_eq!(html, "<p>Hi <strong>there</strong></p>\n");
    }

    #[test]
    fn test_unterminated_fence_renders_as_code() {
        let html = HtmlFormatter.format("```rust\nfn main() {");
        assert!(html.starts_with("<pre><code class=\"language-rust\">"));
        assert!(html.contains("fn main() {"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = HtmlFormatter.format("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_plain_escapes() {
        assert_eq!(HtmlFormatter.plain("a < b & c"), "a &lt; b &amp; c");
    }

    #[test]
    fn test_tables_enabled() {
        let html = HtmlFormatter.format("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }
}
