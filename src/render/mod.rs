//! Incremental rendering of streamed replies.
//!
//! Markdown structure (an unterminated code fence, a list still being
//! written) only resolves against the whole text, so every chunk re-renders
//! the entire accumulated reply rather than appending a delta.
//!
//! - [`Formatter`] - pure text → markup function (HTML or plain)
//! - [`render_markdown`] - styled lines for the terminal, rendered by the view
//! - [`Spacer`] - keeps the growing reply anchored near the top of the view
//! - [`IncrementalRenderer`] - ties the two to one assistant bubble

mod html;
mod incremental;
mod markdown;
mod spacer;

pub use html::HtmlFormatter;
pub use incremental::IncrementalRenderer;
pub use markdown::{render_markdown, wrapped_line_count};
pub use spacer::Spacer;

/// Replaces the assistant bubble when a send fails. Partial output is dropped.
pub const APOLOGY: &str = "Sorry, something went wrong. Please try again.";

/// Converts message text into whatever the view displays.
pub trait Formatter: Send + Sync {
    /// Render markdown (assistant messages).
    fn format(&self, markdown: &str) -> String;

    /// Render text verbatim (user messages, fixed strings).
    fn plain(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Leaves text untouched.
///
/// Used by views that style markdown themselves, like the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn format(&self, markdown: &str) -> String {
        markdown.to_string()
    }
}
