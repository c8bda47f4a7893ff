//! Error types for progress construction.
//!
//! The only fallible step in this crate is capturing the terminal width when a
//! [`ProgressIter`](crate::ProgressIter) is built. Both variants are
//! environment errors: they mean the process has no usable controlling terminal,
//! and retrying will not help.

use std::io;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = ProgressError> = std::result::Result<T, E>;

/// Errors raised while constructing a progress wrapper.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// Standard output is not attached to a terminal.
    #[error("no controlling terminal: stdout is not a tty")]
    NoTerminal,

    /// The terminal is attached but refused to report its size.
    #[error("failed to query terminal size: {0}")]
    TerminalSize(#[source] io::Error),
}

impl ProgressError {
    /// Returns `true` when the error stems from the process environment
    /// (missing or unusable terminal) rather than from caller input.
    #[must_use]
    pub const fn is_environment(&self) -> bool {
        matches!(self, Self::NoTerminal | Self::TerminalSize(_))
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::ProgressError;

    /// Environment Classification
    /// Both construction failures are reported as environment errors.
    #[test]
    fn test_environment_kind() {
        assert!(ProgressError::NoTerminal.is_environment());

        let err = ProgressError::TerminalSize(io::Error::other("ioctl failed"));
        assert!(err.is_environment());
        assert_eq!(
            err.to_string(),
            "failed to query terminal size: ioctl failed"
        );
    }
}
