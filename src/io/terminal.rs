//! Terminal setup and teardown for the interactive display.

use anyhow::{Context, Result};
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{Write, stdout};

use crate::display::layout::Viewport;

/// Holds the terminal in raw mode on the alternate screen.
///
/// Dropping the guard restores the terminal, including on early return and
/// panic unwinding.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;

        // From here on the guard owns restoration.
        let guard = Self { active: true };
        execute!(stdout(), EnterAlternateScreen, cursor::Hide)
            .context("Failed to enter alternate screen")?;
        Ok(guard)
    }

    pub fn restore(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        let mut out = stdout();
        let _ = execute!(out, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = out.flush();
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Current terminal size, falling back to 80x24 when it cannot be read.
pub fn current_viewport() -> Viewport {
    let (columns, rows) = terminal::size().unwrap_or((80, 24));
    Viewport::new(columns, rows)
}
