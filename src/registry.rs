//! The arena of registered display instances.
//!
//! Slots are appended once during bring-up and never removed; the append
//! order fixes the order in which the multiplexer services the displays.

use heapless::Vec;

use crate::Result;
use crate::error::Error;
use crate::glyphs::Glyph;

/// The most displays one driver can multiplex.
pub const DISPLAY_COUNT_MAX: usize = 4;

/// An opaque handle naming one registered display.
///
/// Handles are only meaningful for the driver that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayHandle(u8);

impl DisplayHandle {
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One registered display: its digit-select pin and requested value.
pub(crate) struct Slot<P> {
    pub(crate) pin: P,
    pub(crate) glyph: Glyph,
    pub(crate) blink: bool,
}

pub(crate) struct Registry<P>(Vec<Slot<P>, DISPLAY_COUNT_MAX>);

impl<P> Registry<P> {
    pub(crate) const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a display showing [`Glyph::Blank`].
    pub(crate) fn register(&mut self, pin: P) -> Result<DisplayHandle> {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "The registry never holds more than four slots"
        )]
        let handle = DisplayHandle(self.0.len() as u8);
        self.0
            .push(Slot {
                pin,
                glyph: Glyph::Blank,
                blink: false,
            })
            .map_err(|_| Error::CapacityExceeded)?;
        Ok(handle)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn slot(&self, index: usize) -> Option<&Slot<P>> {
        self.0.get(index)
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut Slot<P>> {
        self.0.get_mut(index)
    }

    pub(crate) fn slots_mut(&mut self) -> impl Iterator<Item = &mut Slot<P>> {
        self.0.iter_mut()
    }

    pub(crate) fn into_pins(self) -> Vec<P, DISPLAY_COUNT_MAX> {
        self.0.into_iter().map(|slot| slot.pin).collect()
    }
}
