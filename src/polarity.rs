//! Translation of logical on/off into physical pin levels.

use embedded_hal::digital::{OutputPin, PinState};

use crate::Result;
use crate::error::Error;

/// Wiring polarity of one pin family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Driving the line high lights it.
    #[default]
    ActiveHigh,
    /// Driving the line low lights it.
    ActiveLow,
}

impl Polarity {
    /// The physical level that renders the requested logical state.
    #[must_use]
    pub const fn state(self, on: bool) -> PinState {
        match (self, on) {
            (Self::ActiveHigh, true) | (Self::ActiveLow, false) => PinState::High,
            (Self::ActiveHigh, false) | (Self::ActiveLow, true) => PinState::Low,
        }
    }

    /// Drives `pin` to the physical level for logical `on`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotSetOutputState`] if the pin write fails.
    #[inline]
    pub fn drive<P: OutputPin>(self, pin: &mut P, on: bool) -> Result<()> {
        pin.set_state(self.state(on))
            .map_err(|_| Error::CannotSetOutputState)
    }
}

/// Wiring polarities of the driver, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MuxConfig {
    /// Polarity of the shared segment lines.
    pub segments: Polarity,
    /// Polarity of the per-display digit-select lines.
    pub digit_select: Polarity,
}

impl Default for MuxConfig {
    /// Common-cathode wiring: segments light high, digit-select lines light low.
    fn default() -> Self {
        Self {
            segments: Polarity::ActiveHigh,
            digit_select: Polarity::ActiveLow,
        }
    }
}
