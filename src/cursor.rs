//! Cursor control for redrawing the progress line in place.
//!
//! The renderer only ever needs one movement: back to column 0 of the line it
//! printed last. [`TerminalCursor`] captures that capability so the platform
//! specific part stays out of the rendering code.
//!
//! * [`PlatformCursor`]: the default, backed by `crossterm`. On ANSI terminals
//!   this queues `CSI 1 F`; on legacy Windows consoles crossterm talks to the
//!   console API instead. Both stop at the top row of the buffer.
//! * [`RecordingCursor`]: writes nothing and counts calls. Useful when output
//!   goes somewhere other than a terminal, and in tests.

use std::io::{self, Write};

use crossterm::{cursor::MoveToPreviousLine, queue};

/// Moves the terminal cursor to the start of the previous line.
pub trait TerminalCursor {
    /// Repositions the cursor to column 0 of the line above the current one.
    ///
    /// Escape sequences, if any, are queued on `out`; the caller flushes.
    ///
    /// # Errors
    ///
    /// Propagates failures from writing to `out` or from the console API.
    fn move_to_start_of_previous_line<W: Write>(&mut self, out: &mut W) -> io::Result<()>;
}

/// Cursor control for the host terminal.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlatformCursor;

impl TerminalCursor for PlatformCursor {
    fn move_to_start_of_previous_line<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        queue!(out, MoveToPreviousLine(1))
    }
}

/// A cursor that only counts how often it was asked to move.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RecordingCursor {
    moves: usize,
}

impl RecordingCursor {
    /// Creates a cursor with no recorded moves.
    #[must_use]
    pub const fn new() -> Self {
        Self { moves: 0 }
    }

    /// Number of repositions requested so far.
    #[must_use]
    pub const fn moves(&self) -> usize {
        self.moves
    }
}

impl TerminalCursor for RecordingCursor {
    fn move_to_start_of_previous_line<W: Write>(&mut self, _out: &mut W) -> io::Result<()> {
        self.moves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PlatformCursor, RecordingCursor, TerminalCursor as _};

    /// ANSI Sequence
    /// The platform cursor emits "previous line" for a single row.
    #[cfg(not(windows))]
    #[test]
    fn test_platform_cursor_sequence() {
        let mut out = Vec::new();
        PlatformCursor
            .move_to_start_of_previous_line(&mut out)
            .unwrap();

        assert_eq!(out, b"\x1b[1F");
    }

    /// Recording Double
    /// Counts calls without touching the writer.
    #[test]
    fn test_recording_cursor() {
        let mut out = Vec::new();
        let mut cursor = RecordingCursor::new();

        cursor.move_to_start_of_previous_line(&mut out).unwrap();
        cursor.move_to_start_of_previous_line(&mut out).unwrap();

        assert_eq!(cursor.moves(), 2);
        assert!(out.is_empty());
    }
}
