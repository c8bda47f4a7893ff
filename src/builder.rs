//! Fluent interface for constructing [`ProgressIter`] instances.
//!
//! The quick paths ([`wrap`](crate::wrap) and
//! [`ProgressIteratorExt`](crate::ProgressIteratorExt)) draw to stdout and
//! capture the width of the controlling terminal. [`ProgressBuilder`] lets you
//! replace each of those collaborators.
//!
//! # Key Features
//!
//! * **Explicit width:** [`with_width`](ProgressBuilder::with_width) skips the
//!   terminal query, so the wrapper can be built without a tty.
//! * **Custom sink and cursor:** draw into any [`Write`] and reposition with any
//!   [`TerminalCursor`], e.g. a `Vec<u8>` and a [`RecordingCursor`](crate::cursor::RecordingCursor).
//! * **Custom clock:** inject a deterministic time source for rate math.

use std::io::{self, Stdout, Write};

use compact_str::CompactString;
use tracing::debug;

use crate::{
    cursor::{PlatformCursor, TerminalCursor},
    error::Result,
    iter::{ProgressIter, total_from_size_hint},
    progress::{Clock, ProgressState, SystemClock},
    render::{DEFAULT_UNIT, LineRenderer, RenderConfig},
    terminal::terminal_width,
};

/// A builder for [`ProgressIter`].
pub struct ProgressBuilder<W = Stdout, C = PlatformCursor> {
    description: CompactString,
    unit: CompactString,
    width: Option<u16>,
    out: W,
    cursor: C,
    clock: Box<dyn Clock>,
}

impl ProgressBuilder {
    /// Starts a builder drawing to stdout with the platform cursor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            description: CompactString::default(),
            unit: CompactString::const_new(DEFAULT_UNIT),
            width: None,
            out: io::stdout(),
            cursor: PlatformCursor,
            clock: Box::new(SystemClock),
        }
    }
}

impl Default for ProgressBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<W, C> ProgressBuilder<W, C> {
    /// Sets the label printed before the bar.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<CompactString>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the throughput unit label (default `"it"`).
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<CompactString>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Uses `width` columns instead of querying the terminal.
    #[must_use]
    pub const fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replaces the output sink.
    #[must_use]
    pub fn with_writer<W2>(self, out: W2) -> ProgressBuilder<W2, C> {
        ProgressBuilder {
            description: self.description,
            unit: self.unit,
            width: self.width,
            out,
            cursor: self.cursor,
            clock: self.clock,
        }
    }

    /// Replaces the cursor implementation.
    #[must_use]
    pub fn with_cursor<C2>(self, cursor: C2) -> ProgressBuilder<W, C2> {
        ProgressBuilder {
            description: self.description,
            unit: self.unit,
            width: self.width,
            out: self.out,
            cursor,
            clock: self.clock,
        }
    }
}

impl<W: Write, C: TerminalCursor> ProgressBuilder<W, C> {
    /// Consumes the builder and wraps `source`.
    ///
    /// The total is taken from the source's size hint when it is exact, otherwise
    /// it is `0` and nothing is drawn.
    ///
    /// # Errors
    ///
    /// Returns an environment error when no width was set and the terminal
    /// cannot be queried.
    pub fn wrap<I: IntoIterator>(self, source: I) -> Result<ProgressIter<I::IntoIter, W, C>> {
        let iter = source.into_iter();
        let total = total_from_size_hint(&iter);
        self.build(iter, total)
    }

    pub(crate) fn build<I>(self, iter: I, total: u64) -> Result<ProgressIter<I, W, C>> {
        let width = match self.width {
            Some(width) => width,
            None => terminal_width()?,
        };
        let config = RenderConfig::new(self.description, self.unit, width);
        let layout = config.layout();
        debug!(
            width,
            step_size = layout.step_size(),
            bar_slots = layout.bar_slots(),
            total,
            "progress wrapper created"
        );

        let state = ProgressState::new(total, self.clock.now());
        let renderer = LineRenderer::new(config, self.out, self.cursor);
        Ok(ProgressIter::new(iter, state, renderer, self.clock))
    }
}

#[cfg(test)]
mod tests {
    use super::ProgressBuilder;
    use crate::{cursor::RecordingCursor, render::BarLayout};

    /// Configuration Capture
    /// Builder settings end up in the immutable render config.
    #[test]
    fn test_config_capture() {
        let iter = ProgressBuilder::new()
            .with_description("load ")
            .with_unit("MB")
            .with_width(120)
            .with_writer(Vec::new())
            .with_cursor(RecordingCursor::new())
            .wrap(vec![1, 2, 3])
            .unwrap();

        let config = iter.renderer().config();
        assert_eq!(config.description(), "load ");
        assert_eq!(config.unit(), "MB");
        assert_eq!(config.terminal_width(), 120);
        assert_eq!(config.layout(), BarLayout::WIDE);
        assert_eq!(iter.len(), 3);
    }

    /// Defaults
    /// An untouched builder uses the "it" unit and an empty description.
    #[test]
    fn test_defaults() {
        let iter = ProgressBuilder::default()
            .with_width(40)
            .with_writer(Vec::new())
            .wrap(0..2)
            .unwrap();

        let config = iter.renderer().config();
        assert_eq!(config.unit(), "it");
        assert_eq!(config.description(), "");
        assert_eq!(config.layout(), BarLayout::NARROW);
    }
}
