//! # `line_progress`
//!
//! An in-place, single-line terminal progress bar for iterators.
//!
//! Wrap any iterable and every pulled item redraws one line on stdout with a
//! fixed-width bar, a counter, the throughput since the previous item and the
//! completion percentage:
//!
//! ```text
//! Desc[==========*          ] 10/20 12.34it/s (50.00%)
//! ```
//!
//! The line is overwritten rather than scrolled. Sources without an exact
//! length are passed through with no output.
//!
//! ## Modules
//!
//! * [`builder`]: Fluent construction with custom sink, cursor, width and clock.
//! * [`cursor`]: The [`TerminalCursor`] capability used to move back onto the drawn line.
//! * [`error`]: Construction errors.
//! * [`iter`]: The [`ProgressIter`] adapter and the [`ProgressIteratorExt`] extension trait.
//! * [`progress`]: Per-run accounting and rate math.
//! * [`render`]: Line formatting and the [`LineRenderer`].
//! * [`terminal`]: One-time terminal width capture.
//!
//! ## Example
//!
//! ```no_run
//! let data: Vec<u32> = (0..100).collect();
//! for item in line_progress::wrap(&data, "Desc", "it")? {
//!     let _ = item;
//! }
//! # Ok::<(), line_progress::ProgressError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod builder;
pub mod cursor;
pub mod error;
pub mod iter;
pub mod progress;
pub mod render;
pub mod terminal;

pub use builder::ProgressBuilder;
pub use cursor::{PlatformCursor, RecordingCursor, TerminalCursor};
pub use error::{ProgressError, Result};
pub use iter::{ProgressIter, ProgressIteratorExt, wrap};
pub use progress::{Clock, ProgressState, Rate, SystemClock, Tick};
pub use render::{BarLayout, LineRenderer, RenderConfig};
