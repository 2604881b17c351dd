//! Terminal setup and teardown functions.

use crossterm::{
    cursor::Show,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Switch to the alternate screen with bracketed paste.
///
/// Raw mode is enabled separately by [`super::TerminalGuard::enter`].
pub fn enter_chat_screen<W: Write>(writer: &mut W) -> io::Result<()> {
    execute!(writer, EnterAlternateScreen, EnableBracketedPaste)
}

/// Return to the main screen. Safe to call more than once; errors are ignored.
pub fn leave_chat_screen<W: Write>(writer: &mut W) {
    let _ = execute!(writer, DisableBracketedPaste, LeaveAlternateScreen, Show);
    let _ = writer.flush();
}

/// Restore the terminal after a panic or fatal error.
pub fn emergency_restore() {
    let _ = disable_raw_mode();
    leave_chat_screen(&mut io::stdout());
}

/// Raw mode plus the alternate screen on stdout.
pub(super) fn enter_raw_screen() -> io::Result<()> {
    enable_raw_mode()?;
    if let Err(e) = enter_chat_screen(&mut io::stdout()) {
        let _ = disable_raw_mode();
        return Err(e);
    }
    Ok(())
}
