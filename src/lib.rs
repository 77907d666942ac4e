//! Multiplexed driver for small banks of seven-segment LED displays.
//!
//! One set of segment lines is shared across up to four displays, each with
//! its own digit-select line. A periodic call to [`SegMux::tick`] services
//! one display at a time, fast enough that the eye sees every digit lit.
//! Wiring polarity is configurable per pin family, values are validated
//! before they are stored, and all pin I/O happens inside the tick.
//!
//! On RP2040-class targets the `pico1`/`pico2` features add
//! `MuxDisplay`, a virtual device that runs the tick cadence as a
//! background task.
#![no_std]

mod error;
mod glyphs;
mod mux;
mod output_array;
mod polarity;
mod registry;

#[cfg(any(feature = "pico1", feature = "pico2"))]
mod device;

pub use error::{Error, Result};
pub use glyphs::{GLYPH_COUNT, Glyph, SEGMENT_COUNT};
pub use mux::{BLINK_OFF_TICKS, BLINK_ON_TICKS, NUMBER_OFF, SegMux, max_number};
pub use output_array::OutputArray;
pub use polarity::{MuxConfig, Polarity};
pub use registry::{DISPLAY_COUNT_MAX, DisplayHandle};

#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use device::{MULTIPLEX_SLEEP, MuxDisplay, MuxNotifier, MuxUpdate};
