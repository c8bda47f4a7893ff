//! Formatting and drawing of the progress line.
//!
//! A rendered line looks like:
//!
//! ```text
//! Desc[==========*          ] 10/20 12.34it/s (50.00%)
//! ```
//!
//! The bar body is always `bar_slots + 1` characters wide: one `=` per completed
//! step, a single `*` marking the leading edge, and blank padding. The slot
//! budget is picked once from the terminal width (see [`BarLayout::for_width`]).
//! A block of trailing blanks wipes leftovers from a longer previous line.
//!
//! [`format_line`] is pure. [`LineRenderer`] owns the output sink and a
//! [`TerminalCursor`] and performs the actual redraw.

use std::io::{self, Write};

use compact_str::CompactString;
use tracing::trace;

use crate::{cursor::TerminalCursor, progress::Tick};

/// Terminals narrower than this get the compact bar.
pub const WIDE_LAYOUT_MIN_WIDTH: u16 = 90;

/// Default throughput unit label.
pub const DEFAULT_UNIT: &str = "it";

/// Blanks appended to every line to erase longer earlier output.
const TRAILING_BLANKS: &str = "          ";

/// Granularity and slot count of the bar body.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "rkyv",
    derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "rkyv", rkyv(derive(Debug, Eq, PartialEq)))]
pub struct BarLayout {
    step_size: u32,
    bar_slots: u32,
}

impl BarLayout {
    /// 5% per glyph, 20 slots.
    pub const NARROW: Self = Self {
        step_size: 5,
        bar_slots: 20,
    };

    /// 2% per glyph, 50 slots.
    pub const WIDE: Self = Self {
        step_size: 2,
        bar_slots: 50,
    };

    /// Picks the layout for a terminal `width` columns wide.
    #[must_use]
    pub const fn for_width(width: u16) -> Self {
        if width < WIDE_LAYOUT_MIN_WIDTH {
            Self::NARROW
        } else {
            Self::WIDE
        }
    }

    /// Percentage points covered by one `=` glyph.
    #[must_use]
    pub const fn step_size(&self) -> u32 {
        self.step_size
    }

    /// Number of slots in the bar, excluding the leading-edge glyph.
    #[must_use]
    pub const fn bar_slots(&self) -> u32 {
        self.bar_slots
    }

    /// Number of `=` glyphs drawn for `percent`.
    ///
    /// Counts whole steps below the floored percentage, capped at
    /// [`bar_slots`](Self::bar_slots) so an overrun never widens the bar.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn filled_count(&self, percent: f64) -> u32 {
        let whole = percent.floor();
        if whole.is_nan() || whole < 0.0 {
            return 0;
        }
        let whole = whole.min(f64::from(u32::MAX)) as u32;
        (whole / self.step_size).min(self.bar_slots)
    }

    /// Renders the bar body for `percent`, always `bar_slots + 1` characters.
    #[must_use]
    pub fn bar(&self, percent: f64) -> String {
        let filled = self.filled_count(percent) as usize;
        let padding = (self.bar_slots as usize).saturating_sub(filled);

        let mut body = String::with_capacity(self.bar_slots as usize + 1);
        body.extend(std::iter::repeat_n('=', filled));
        body.push('*');
        body.extend(std::iter::repeat_n(' ', padding));
        body
    }
}

/// Immutable rendering settings captured when a wrapper is built.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderConfig {
    description: CompactString,
    unit: CompactString,
    terminal_width: u16,
    layout: BarLayout,
}

impl RenderConfig {
    /// Creates a config, deriving the bar layout from `terminal_width`.
    pub fn new(
        description: impl Into<CompactString>,
        unit: impl Into<CompactString>,
        terminal_width: u16,
    ) -> Self {
        Self {
            description: description.into(),
            unit: unit.into(),
            terminal_width,
            layout: BarLayout::for_width(terminal_width),
        }
    }

    /// Label printed before the bar.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Throughput unit label.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Terminal width captured at construction.
    #[must_use]
    pub const fn terminal_width(&self) -> u16 {
        self.terminal_width
    }

    /// Bar layout derived from the width.
    #[must_use]
    pub const fn layout(&self) -> BarLayout {
        self.layout
    }
}

/// Formats one progress line, without a line terminator.
#[must_use]
pub fn format_line(config: &RenderConfig, tick: &Tick) -> String {
    let description = config.description();
    let bar = config.layout().bar(tick.percent());
    let position = tick.position();
    let total = tick.total();
    let rate = tick.rate();
    // "inf" is followed by a space before the unit, numeric rates are not.
    let rate_sep = if rate.is_infinite() { " " } else { "" };
    let unit = config.unit();
    let percent = tick.percent();

    format!(
        "{description}[{bar}] {position}/{total} {rate}{rate_sep}{unit}/s ({percent:.2}%){TRAILING_BLANKS}"
    )
}

/// Draws progress lines to `W`, repositioning with `C`.
#[derive(Debug)]
pub struct LineRenderer<W, C> {
    config: RenderConfig,
    out: W,
    cursor: C,
}

impl<W: Write, C: TerminalCursor> LineRenderer<W, C> {
    /// Creates a renderer writing to `out`.
    pub const fn new(config: RenderConfig, out: W, cursor: C) -> Self {
        Self {
            config,
            out,
            cursor,
        }
    }

    /// Moves the cursor back onto the previously drawn line.
    ///
    /// # Errors
    ///
    /// Propagates cursor or write failures.
    pub fn reposition(&mut self) -> io::Result<()> {
        self.cursor.move_to_start_of_previous_line(&mut self.out)
    }

    /// Writes the line for `tick` and flushes.
    ///
    /// The line is terminated so the next [`reposition`](Self::reposition) lands
    /// at its first column.
    ///
    /// # Errors
    ///
    /// Propagates write and flush failures.
    pub fn render(&mut self, tick: &Tick) -> io::Result<()> {
        let line = format_line(&self.config, tick);
        trace!(
            position = tick.position(),
            total = tick.total(),
            percent = tick.percent(),
            "render"
        );
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }
}

impl<W, C> LineRenderer<W, C> {
    /// Rendering settings.
    #[must_use]
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The output sink.
    #[must_use]
    pub const fn writer(&self) -> &W {
        &self.out
    }

    /// The cursor implementation.
    #[must_use]
    pub const fn cursor(&self) -> &C {
        &self.cursor
    }

    /// Consumes the renderer, returning the sink and cursor.
    pub fn into_parts(self) -> (W, C) {
        (self.out, self.cursor)
    }
}
