//! Iterator adapter that redraws a progress line on every pulled item.
//!
//! This module provides [`ProgressIter`] and the [`ProgressIteratorExt`] trait,
//! which adds helper methods to any Rust [`Iterator`].
//!
//! # Heuristics
//!
//! The total is read from [`Iterator::size_hint`]:
//! * If the lower and upper bounds agree, that is the total and a bar is drawn.
//! * Otherwise the total is `0` and items pass through without any output.
//!
//! # Example
//!
//! ```ignore
//! use line_progress::ProgressIteratorExt;
//!
//! for item in vec![1, 2, 3].into_iter().progress_with_desc("items")? {
//!     // ...
//! }
//! ```

use std::{
    io::{self, Stdout, Write},
    iter::FusedIterator,
};

use compact_str::CompactString;
use tracing::warn;

use crate::{
    builder::ProgressBuilder,
    cursor::{PlatformCursor, TerminalCursor},
    error::Result,
    progress::{Clock, ProgressState, Tick},
    render::LineRenderer,
};

/// An iterator adapter that yields the wrapped items unchanged and redraws the
/// progress line before each one.
pub struct ProgressIter<I, W = Stdout, C = PlatformCursor> {
    iter: I,
    state: ProgressState,
    renderer: LineRenderer<W, C>,
    clock: Box<dyn Clock>,
    /// Cleared after the first failed write; items keep flowing.
    render_enabled: bool,
}

impl<I, W, C> ProgressIter<I, W, C> {
    pub(crate) fn new(
        iter: I,
        state: ProgressState,
        renderer: LineRenderer<W, C>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            iter,
            state,
            renderer,
            clock,
            render_enabled: true,
        }
    }

    /// Captured length of the source, `0` when unknown.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.state.total()
    }

    /// Returns `true` when the source reported no (or an unknown) length.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.state.total() == 0
    }

    /// Number of items yielded so far.
    #[must_use]
    pub const fn consumed(&self) -> u64 {
        self.state.consumed()
    }

    /// The progress accounting for this run.
    #[must_use]
    pub const fn state(&self) -> &ProgressState {
        &self.state
    }

    /// The renderer, with its sink and cursor.
    #[must_use]
    pub const fn renderer(&self) -> &LineRenderer<W, C> {
        &self.renderer
    }
}

impl<I, W: Write, C: TerminalCursor> ProgressIter<I, W, C> {
    fn draw(&mut self) {
        let now = self.clock.now();
        let tick = self.state.tick(now);

        if self.render_enabled {
            if let Err(err) = self.redraw(&tick) {
                warn!(%err, "failed to draw progress line, rendering disabled");
                self.render_enabled = false;
            }
        }

        self.state.set_last_emit(now);
    }

    fn redraw(&mut self, tick: &Tick) -> io::Result<()> {
        // The first line is appended; later ones overwrite it.
        if self.state.has_rendered() {
            self.renderer.reposition()?;
        }
        self.renderer.render(tick)?;
        self.state.mark_rendered();
        Ok(())
    }
}

impl<I: Iterator, W: Write, C: TerminalCursor> Iterator for ProgressIter<I, W, C> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next()?;

        if self.state.is_tracking() {
            self.draw();
        }
        self.state.consume();

        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I: FusedIterator, W: Write, C: TerminalCursor> FusedIterator for ProgressIter<I, W, C> {}

/// Returns the exact length advertised by `iter`, or `0` when it is not exact.
pub(crate) fn total_from_size_hint<I: Iterator>(iter: &I) -> u64 {
    let (lower, upper) = iter.size_hint();
    match upper {
        Some(upper) if upper == lower => u64::try_from(upper).unwrap_or(0),
        _ => 0,
    }
}

/// Wraps `source` in a progress line drawn to stdout.
///
/// # Errors
///
/// Returns an environment error when stdout is not attached to a terminal.
pub fn wrap<I: IntoIterator>(
    source: I,
    description: impl Into<CompactString>,
    unit: impl Into<CompactString>,
) -> Result<ProgressIter<I::IntoIter>> {
    ProgressBuilder::new()
        .with_description(description)
        .with_unit(unit)
        .wrap(source)
}

/// Extension trait to attach a progress line to any Iterator.
pub trait ProgressIteratorExt: Sized {
    /// Wraps the iterator with no description and the default unit.
    ///
    /// # Errors
    ///
    /// Returns an environment error when stdout is not attached to a terminal.
    fn progress(self) -> Result<ProgressIter<Self>>;

    /// Wraps the iterator with a description.
    ///
    /// # Errors
    ///
    /// Returns an environment error when stdout is not attached to a terminal.
    fn progress_with_desc(
        self,
        description: impl Into<CompactString>,
    ) -> Result<ProgressIter<Self>>;

    /// Wraps the iterator using a configured [`ProgressBuilder`].
    ///
    /// # Errors
    ///
    /// Returns an environment error when the builder has no width and the
    /// terminal cannot be queried.
    fn progress_with<W: Write, C: TerminalCursor>(
        self,
        builder: ProgressBuilder<W, C>,
    ) -> Result<ProgressIter<Self, W, C>>;
}

impl<I: Iterator> ProgressIteratorExt for I {
    fn progress(self) -> Result<ProgressIter<Self>> {
        ProgressBuilder::new().wrap(self)
    }

    fn progress_with_desc(
        self,
        description: impl Into<CompactString>,
    ) -> Result<ProgressIter<Self>> {
        ProgressBuilder::new()
            .with_description(description)
            .wrap(self)
    }

    fn progress_with<W: Write, C: TerminalCursor>(
        self,
        builder: ProgressBuilder<W, C>,
    ) -> Result<ProgressIter<Self, W, C>> {
        builder.wrap(self)
    }
}
