//! One-time terminal width capture.
//!
//! The width is read once when a wrapper is built and never again; resizing the
//! terminal mid-run does not change the bar layout.

use std::io::{self, IsTerminal as _};

use tracing::debug;

use crate::error::{ProgressError, Result};

/// Returns the column count of the terminal attached to stdout.
///
/// # Errors
///
/// * [`ProgressError::NoTerminal`] when stdout is not a tty.
/// * [`ProgressError::TerminalSize`] when the size query fails.
pub fn terminal_width() -> Result<u16> {
    if !io::stdout().is_terminal() {
        return Err(ProgressError::NoTerminal);
    }

    let (columns, rows) = crossterm::terminal::size().map_err(ProgressError::TerminalSize)?;
    debug!(columns, rows, "captured terminal size");
    Ok(columns)
}
