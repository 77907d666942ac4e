//! The multiplexing engine for a bank of seven-segment displays.
//!
//! The engine shares one set of segment lines across every registered
//! display and enables exactly one digit-select line at a time. Called at a
//! steady cadence of a few milliseconds, [`SegMux::tick`] services one
//! display per call; persistence of vision makes the whole bank appear lit.
//!
//! Each tick first drives every digit-select line off, then loads the due
//! display's segment pattern, then enables that display's select line. The
//! blank pass guarantees no two select lines overlap, so a neighboring
//! display never flashes the wrong pattern during the hand-off.

use embedded_hal::digital::OutputPin;

use crate::Result;
use crate::error::Error;
use crate::glyphs::{Glyph, SEGMENT_COUNT};
use crate::output_array::OutputArray;
use crate::polarity::MuxConfig;
use crate::registry::{DISPLAY_COUNT_MAX, DisplayHandle, Registry};

// ============================================================================
// Constants
// ============================================================================

/// The value that switches the whole bank off.
///
/// Passing this to [`SegMux::set_number`] blanks every digit-select line
/// immediately and parks the engine until the next accepted value.
pub const NUMBER_OFF: u16 = u16::MAX;

/// Ticks of the lit window of a blinking display (150 ms at a 3 ms cadence).
pub const BLINK_ON_TICKS: u32 = 50;

/// Ticks of the blanked window of a blinking display (about 50 ms).
pub const BLINK_OFF_TICKS: u32 = 17;

const BLINK_PERIOD_TICKS: u32 = BLINK_ON_TICKS + BLINK_OFF_TICKS;

/// The largest value displayable on `display_count` decimal digits.
#[must_use]
pub const fn max_number(display_count: usize) -> u16 {
    match display_count {
        0 => 0,
        1 => 9,
        2 => 99,
        3 => 999,
        _ => 9999,
    }
}

// ============================================================================
// Engine state
// ============================================================================

/// Whether the engine is servicing displays or parked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MuxState {
    /// Parked after [`NUMBER_OFF`]; ticks perform no pin writes.
    Idle,
    /// Round-robin over the registered displays.
    Cycling,
}

// ============================================================================
// SegMux
// ============================================================================

/// A multiplexed bank of up to four seven-segment displays.
///
/// The driver owns every pin it touches: the eight shared segment lines and
/// one digit-select line per registered display. Registration order fixes
/// the round-robin service order, and [`register_display`](Self::register_display)
/// hands back a small copyable [`DisplayHandle`] for later value updates.
///
/// [`tick`](Self::tick) performs all pin I/O and must be invoked once per
/// multiplexing period by a timer interrupt or a scheduler task; the
/// value-set methods only store state, so what is shown is decoupled from
/// when it is rendered. Every operation completes in bounded time.
pub struct SegMux<P> {
    segment_pins: OutputArray<P, SEGMENT_COUNT>,
    registry: Registry<P>,
    config: MuxConfig,
    cursor: usize,
    state: MuxState,
    blink_phase: u32,
}

impl<P: OutputPin> SegMux<P> {
    /// Creates a driver with no displays registered and blanks the segment
    /// lines.
    ///
    /// Add displays with [`register_display`](Self::register_display); a
    /// tick before the first registration performs no pin writes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotSetOutputState`] if blanking a segment line
    /// fails.
    pub fn new(segment_pins: [P; SEGMENT_COUNT], config: MuxConfig) -> Result<Self> {
        let mut segment_pins = OutputArray::new(segment_pins);
        segment_pins.set_all(false, config.segments)?;
        Ok(Self {
            segment_pins,
            registry: Registry::new(),
            config,
            cursor: 0,
            state: MuxState::Cycling,
            blink_phase: 0,
        })
    }

    /// Creates a driver spreading one numeric value across `digit_pins`.
    ///
    /// The first pin is the least-significant (rightmost) digit. Use
    /// [`set_number`](Self::set_number) to change what is shown.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for zero digit pins or more than
    /// [`DISPLAY_COUNT_MAX`], and [`Error::CannotSetOutputState`] if a pin
    /// write fails.
    pub fn with_digit_pins(
        segment_pins: [P; SEGMENT_COUNT],
        digit_pins: impl IntoIterator<Item = P>,
        config: MuxConfig,
    ) -> Result<Self> {
        let mut mux = Self::new(segment_pins, config)?;
        for pin in digit_pins {
            mux.register_display(pin).map_err(|err| match err {
                Error::CapacityExceeded => Error::Configuration,
                other => other,
            })?;
        }
        if mux.registry.is_empty() {
            return Err(Error::Configuration);
        }
        Ok(mux)
    }

    /// Registers one more display, taking ownership of its digit-select pin.
    ///
    /// The line is driven off right away and the display starts out blank.
    /// Registration order fixes the round-robin service order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] once [`DISPLAY_COUNT_MAX`]
    /// displays exist (the pin is dropped), or
    /// [`Error::CannotSetOutputState`] if the pin write fails.
    pub fn register_display(&mut self, mut pin: P) -> Result<DisplayHandle> {
        if self.registry.len() == DISPLAY_COUNT_MAX {
            return Err(Error::CapacityExceeded);
        }
        self.config.digit_select.drive(&mut pin, false)?;
        self.registry.register(pin)
    }

    /// Stores the glyph for a raw symbol code on one display.
    ///
    /// Performs no pin I/O; the change shows on that display's next
    /// multiplexing slot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSymbol`] for a code with no table entry
    /// (the displayed value is unchanged) and [`Error::IndexOutOfBounds`]
    /// for a handle this driver never issued.
    pub fn set_value(&mut self, handle: DisplayHandle, code: u8) -> Result<()> {
        let glyph = Glyph::from_code(code).ok_or(Error::InvalidSymbol)?;
        self.set_glyph(handle, glyph)
    }

    /// Stores `glyph` on one display.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] for a handle this driver never
    /// issued.
    pub fn set_glyph(&mut self, handle: DisplayHandle, glyph: Glyph) -> Result<()> {
        let slot = self
            .registry
            .slot_mut(handle.index())
            .ok_or(Error::IndexOutOfBounds)?;
        slot.glyph = glyph;
        self.state = MuxState::Cycling;
        Ok(())
    }

    /// Stores one glyph per registered display, first registered first.
    ///
    /// Entries beyond the registered count are ignored.
    pub fn set_glyphs(&mut self, glyphs: [Glyph; DISPLAY_COUNT_MAX]) {
        for (slot, glyph) in self.registry.slots_mut().zip(glyphs) {
            slot.glyph = glyph;
        }
        self.state = MuxState::Cycling;
    }

    /// Turns blinking on or off for one display.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] for a handle this driver never
    /// issued.
    pub fn set_blink(&mut self, handle: DisplayHandle, blink: bool) -> Result<()> {
        let slot = self
            .registry
            .slot_mut(handle.index())
            .ok_or(Error::IndexOutOfBounds)?;
        slot.blink = blink;
        Ok(())
    }

    /// Spreads `value` across the registered digits, least significant
    /// digit on the first-registered display.
    ///
    /// [`NUMBER_OFF`] blanks every digit-select line immediately, resets
    /// the cursor, and parks the engine; any other accepted value resumes
    /// cycling on the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] when `value` exceeds
    /// [`max_number`] for the registered digit count; the previously shown
    /// value is preserved.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing,
        clippy::integer_division_remainder_used,
        reason = "Digit extraction is modulo ten, which always lands in the digit table"
    )]
    pub fn set_number(&mut self, value: u16) -> Result<()> {
        if value == NUMBER_OFF {
            return self.all_off();
        }
        if value > max_number(self.registry.len()) {
            return Err(Error::InvalidValue);
        }
        let mut rest = value;
        for slot in self.registry.slots_mut() {
            slot.glyph = Glyph::DIGITS[(rest % 10) as usize];
            rest /= 10;
        }
        self.state = MuxState::Cycling;
        Ok(())
    }

    /// Services the next display.
    ///
    /// Order within one call: blank every digit-select line, drive the
    /// segment lines with the due display's pattern, enable that display's
    /// select line, advance the cursor. With no displays registered, or
    /// after [`NUMBER_OFF`], the call performs no pin writes at all.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotSetOutputState`] if a pin write fails; the
    /// failure is not retried.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "Cursor and blink phase advance modulo nonzero bounds"
    )]
    pub fn tick(&mut self) -> Result<()> {
        if self.state == MuxState::Idle || self.registry.is_empty() {
            return Ok(());
        }
        self.blink_phase = self.blink_phase.wrapping_add(1) % BLINK_PERIOD_TICKS;
        let digit_polarity = self.config.digit_select;
        for slot in self.registry.slots_mut() {
            digit_polarity.drive(&mut slot.pin, false)?;
        }

        let blink_lit = self.blink_phase < BLINK_ON_TICKS;
        let slot = self
            .registry
            .slot(self.cursor)
            .ok_or(Error::IndexOutOfBounds)?;
        let pattern = if slot.blink && !blink_lit {
            Glyph::Blank.pattern()
        } else {
            slot.glyph.pattern()
        };
        self.segment_pins.set_from_bits(pattern, self.config.segments)?;

        let slot = self
            .registry
            .slot_mut(self.cursor)
            .ok_or(Error::IndexOutOfBounds)?;
        digit_polarity.drive(&mut slot.pin, true)?;

        self.cursor = self.cursor.wrapping_add(1) % self.registry.len();
        Ok(())
    }

    /// The number of registered displays.
    #[must_use]
    pub fn display_count(&self) -> usize {
        self.registry.len()
    }

    /// The glyph currently stored for `handle`, if the handle is valid.
    #[must_use]
    pub fn glyph(&self, handle: DisplayHandle) -> Option<Glyph> {
        self.registry.slot(handle.index()).map(|slot| slot.glyph)
    }

    /// True after [`NUMBER_OFF`] until the next accepted value.
    #[must_use]
    pub fn is_off(&self) -> bool {
        self.state == MuxState::Idle
    }

    /// Releases every pin: the segment lines, then the digit-select lines
    /// in registration order.
    #[must_use]
    pub fn release(self) -> ([P; SEGMENT_COUNT], heapless::Vec<P, DISPLAY_COUNT_MAX>) {
        (self.segment_pins.into_inner(), self.registry.into_pins())
    }

    fn all_off(&mut self) -> Result<()> {
        let digit_polarity = self.config.digit_select;
        for slot in self.registry.slots_mut() {
            digit_polarity.drive(&mut slot.pin, false)?;
        }
        self.cursor = 0;
        self.blink_phase = 0;
        self.state = MuxState::Idle;
        Ok(())
    }
}
