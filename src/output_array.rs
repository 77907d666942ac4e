use embedded_hal::digital::OutputPin;

use crate::Result;
use crate::polarity::Polarity;

/// A fixed group of output pins driven together.
pub struct OutputArray<P, const N: usize>([P; N]);

impl<P: OutputPin, const N: usize> OutputArray<P, N> {
    pub const fn new(outputs: [P; N]) -> Self {
        Self(outputs)
    }

    /// Releases the pins.
    pub fn into_inner(self) -> [P; N] {
        self.0
    }

    /// Drives every line in the group to logical `on`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotSetOutputState`](crate::Error::CannotSetOutputState)
    /// if a pin write fails.
    pub fn set_all(&mut self, on: bool, polarity: Polarity) -> Result<()> {
        for pin in &mut self.0 {
            polarity.drive(pin, on)?;
        }
        Ok(())
    }
}

impl<P: OutputPin> OutputArray<P, { u8::BITS as usize }> {
    /// Drives the eight lines from `bits`; bit *i* goes to line *i*.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotSetOutputState`](crate::Error::CannotSetOutputState)
    /// if a pin write fails.
    #[inline]
    pub fn set_from_bits(&mut self, mut bits: u8, polarity: Polarity) -> Result<()> {
        for pin in &mut self.0 {
            polarity.drive(pin, (bits & 1) == 1)?;
            bits >>= 1;
        }
        Ok(())
    }
}
