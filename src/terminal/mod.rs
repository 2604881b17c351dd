//! Terminal front end.
//!
//! [`TerminalView`] implements [`crate::traits::ChatView`] over a shared
//! [`Screen`], which [`ui::render`] draws into a ratatui frame. Keys are
//! edited into an [`InputLine`]. [`TerminalGuard`] owns raw mode and the
//! alternate screen and gives them back on drop, including on early returns
//! from `main`.
//!
//! ```no_run
//! use synapse_chat::terminal::{setup_panic_hook, TerminalGuard};
//!
//! fn main() -> color_eyre::Result<()> {
//!     setup_panic_hook();
//!     let _guard = TerminalGuard::enter()?;
//!     // ... run the chat loop ...
//!     Ok(())
//! }
//! ```

mod input;
mod panic;
mod setup;
pub mod ui;
mod view;

pub use input::{InputLine, KeyAction};
pub use panic::setup_panic_hook;
pub use setup::{emergency_restore, enter_chat_screen, leave_chat_screen};
pub use view::{Bubble, Screen, TerminalView, CHROME_ROWS, WELCOME};

use crossterm::terminal::disable_raw_mode;
use std::io;

/// Default spacer gap in rows.
///
/// The library default is in pixels; the terminal binary uses this instead
/// unless `SYNAPSE_SPACER_GAP` is set.
pub const TERMINAL_SPACER_GAP: u32 = 4;

/// RAII guard for raw mode and the alternate screen.
pub struct TerminalGuard {
    cleaned_up: bool,
}

impl TerminalGuard {
    /// Enable raw mode and enter the alternate screen.
    pub fn enter() -> io::Result<Self> {
        setup::enter_raw_screen()?;
        Ok(Self { cleaned_up: false })
    }

    /// Restore the terminal now. Later calls are no-ops.
    pub fn cleanup(&mut self) {
        if self.cleaned_up {
            return;
        }
        self.cleaned_up = true;
        if let Err(e) = disable_raw_mode() {
            tracing::warn!("Failed to disable raw mode: {}", e);
        }
        leave_chat_screen(&mut io::stdout());
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.cleanup();
    }
}
