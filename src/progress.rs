//! Core accounting for a single progress run.
//!
//! [`ProgressState`] is owned by the iterator wrapper and mutated once per pulled
//! item. It only tracks scalars: how many items were consumed, how many were
//! expected, when the previous item was emitted, and whether a line has already
//! been drawn. Everything the renderer needs for one step is captured in a plain
//! [`Tick`], so rendering never reaches back into the state.
//!
//! # Time
//!
//! Timestamps come from a [`Clock`]. The default [`SystemClock`] reads
//! [`Instant::now`]; any `Fn() -> Instant` closure is also a clock, which keeps
//! rate math testable without sleeping.

use std::{fmt, time::Duration};

use web_time::Instant;

/// A source of timestamps.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<F: Fn() -> Instant> Clock for F {
    fn now(&self) -> Instant {
        self()
    }
}

/// Throughput measured between two consecutive items.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "rkyv",
    derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "rkyv", rkyv(derive(Debug, PartialEq)))]
pub enum Rate {
    /// Items per second.
    PerSecond(f64),
    /// No measurable time passed since the previous item.
    Infinite,
}

impl Rate {
    /// Derives the rate from the time spent on one item.
    ///
    /// A zero interval yields [`Rate::Infinite`] instead of dividing by zero.
    #[must_use]
    pub fn from_elapsed(elapsed: Duration) -> Self {
        let secs = elapsed.as_secs_f64();
        if secs > 0.0 {
            Self::PerSecond(1.0 / secs)
        } else {
            Self::Infinite
        }
    }

    /// Returns `true` for [`Rate::Infinite`].
    #[must_use]
    pub const fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerSecond(rate) => write!(f, "{rate:.2}"),
            Self::Infinite => f.write_str("inf"),
        }
    }
}

/// Everything the renderer needs to draw one step.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "rkyv",
    derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "rkyv", rkyv(derive(Debug, PartialEq)))]
pub struct Tick {
    consumed: u64,
    total: u64,
    percent: f64,
    rate: Rate,
}

impl Tick {
    /// Builds a tick from raw values.
    #[must_use]
    pub const fn new(consumed: u64, total: u64, percent: f64, rate: Rate) -> Self {
        Self {
            consumed,
            total,
            percent,
            rate,
        }
    }

    /// Items consumed before the one being drawn.
    #[must_use]
    pub const fn consumed(&self) -> u64 {
        self.consumed
    }

    /// One-based index of the item being drawn.
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.consumed + 1
    }

    /// Captured length of the source.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Completion percentage including the item being drawn. Not clamped.
    #[must_use]
    pub const fn percent(&self) -> f64 {
        self.percent
    }

    /// Throughput since the previous item.
    #[must_use]
    pub const fn rate(&self) -> Rate {
        self.rate
    }
}

/// Mutable accounting for one wrapped sequence.
#[derive(Clone, Debug)]
pub struct ProgressState {
    consumed: u64,
    /// Zero means the length is unknown and nothing is ever drawn.
    total: u64,
    last_emit: Instant,
    has_rendered: bool,
}

impl ProgressState {
    /// Creates the state for a run of `total` items starting at `now`.
    #[must_use]
    pub const fn new(total: u64, now: Instant) -> Self {
        Self {
            consumed: 0,
            total,
            last_emit: now,
            has_rendered: false,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of items yielded so far.
    #[must_use]
    pub const fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Captured length of the source, `0` when unknown.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Time the previous item was emitted (construction time before the first).
    #[must_use]
    pub const fn last_emit(&self) -> Instant {
        self.last_emit
    }

    /// Whether a line has already been drawn in this run.
    #[must_use]
    pub const fn has_rendered(&self) -> bool {
        self.has_rendered
    }

    /// Whether this run draws anything at all.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.total > 0
    }

    // ========================================================================
    // Per-step math
    // ========================================================================

    /// Percentage reached once the next item is emitted.
    ///
    /// Returns `0.0` for an unknown total. Values above `100.0` are kept when
    /// the source yields more items than it reported.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        100.0 * (self.consumed + 1) as f64 / self.total as f64
    }

    /// Computes the values for drawing the next item at `now`.
    #[must_use]
    pub fn tick(&self, now: Instant) -> Tick {
        let elapsed = now.saturating_duration_since(self.last_emit);
        Tick::new(
            self.consumed,
            self.total,
            self.percent(),
            Rate::from_elapsed(elapsed),
        )
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Records the emit time of the item just drawn.
    pub fn set_last_emit(&mut self, now: Instant) {
        self.last_emit = now;
    }

    /// Flags that the first line has been drawn.
    pub fn mark_rendered(&mut self) {
        self.has_rendered = true;
    }

    /// Counts one yielded item.
    pub fn consume(&mut self) {
        self.consumed += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use web_time::Instant;

    use super::{ProgressState, Rate};

    /// Percentage Progression
    /// Percent grows monotonically and reaches exactly 100 on the last item.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_percent_monotonic() {
        let mut state = ProgressState::new(7, Instant::now());
        let mut last = 0.0;

        for _ in 0..7 {
            let pct = state.percent();
            assert!(pct >= last, "percent must not decrease");
            last = pct;
            state.consume();
        }

        assert_eq!(last, 100.0);
    }

    /// Overrun
    /// Feeding more items than reported produces a percentage above 100.
    #[test]
    fn test_percent_overrun_not_clamped() {
        let mut state = ProgressState::new(4, Instant::now());
        for _ in 0..4 {
            state.consume();
        }
        assert!(state.percent() > 100.0);
    }

    /// Unknown Length
    /// A zero total never tracks and reports zero percent.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_unknown_total() {
        let state = ProgressState::new(0, Instant::now());
        assert!(!state.is_tracking());
        assert_eq!(state.percent(), 0.0);
    }

    /// Rate Edge Cases
    /// A zero interval yields the infinite token, otherwise the inverse of the interval.
    #[test]
    fn test_rate_from_elapsed() {
        let inf = Rate::from_elapsed(Duration::ZERO);
        assert!(inf.is_infinite());
        assert_eq!(inf.to_string(), "inf");

        let four = Rate::from_elapsed(Duration::from_millis(250));
        assert_eq!(four, Rate::PerSecond(4.0));
        assert_eq!(four.to_string(), "4.00");
    }

    /// Tick Capture
    /// A tick snapshots the counters and the interval since the last emit.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_tick_capture() {
        let start = Instant::now();
        let mut state = ProgressState::new(10, start);

        let first = state.tick(start + Duration::from_millis(500));
        assert_eq!(first.consumed(), 0);
        assert_eq!(first.position(), 1);
        assert_eq!(first.total(), 10);
        assert_eq!(first.percent(), 10.0);
        assert_eq!(first.rate(), Rate::PerSecond(2.0));

        let emitted = start + Duration::from_millis(500);
        state.set_last_emit(emitted);
        state.consume();

        // Same instant as the previous emit.
        let second = state.tick(emitted);
        assert_eq!(second.position(), 2);
        assert!(second.rate().is_infinite());
    }

    /// Clock Closures
    /// Any closure returning an instant is usable as a clock.
    #[test]
    fn test_closure_clock() {
        use super::Clock as _;

        let fixed = Instant::now();
        let clock = move || fixed;
        assert_eq!(clock.now(), fixed);
    }
}
