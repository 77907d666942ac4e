//! Shared mock pins for exercising the driver on the host.
//!
//! Every pin write lands in one ordered log, so tests can assert not just
//! final levels but the order writes were issued in across all pins.
#![allow(dead_code)] // not every test binary uses every helper

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, OutputPin};
use sevseg_mux::{DisplayHandle, MuxConfig, Polarity, SegMux};

/// Identity of a mock pin in the shared write log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinId {
    Segment(u8),
    Digit(u8),
}

/// One physical level write, in the order the driver issued it.
pub type Write = (PinId, bool);

/// Shared, ordered log of every level written by the driver.
#[derive(Clone, Default)]
pub struct WriteLog(Rc<RefCell<Vec<Write>>>);

impl WriteLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock pin that records into this log under `id`.
    pub fn pin(&self, id: PinId) -> MockPin {
        MockPin {
            id,
            log: self.clone(),
        }
    }

    /// Drains and returns everything written since the last call.
    pub fn take(&self) -> Vec<Write> {
        self.0.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    fn push(&self, write: Write) {
        self.0.borrow_mut().push(write);
    }
}

/// An `OutputPin` that records every level written to it.
pub struct MockPin {
    id: PinId,
    log: WriteLog,
}

impl ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.push((self.id, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.push((self.id, true));
        Ok(())
    }
}

/// Both pin families driven active-high, so logical on reads as `true`
/// in the log.
pub const STRAIGHT: MuxConfig = MuxConfig {
    segments: Polarity::ActiveHigh,
    digit_select: Polarity::ActiveHigh,
};

/// Eight segment-line mocks recording into `log`.
pub fn segment_bank(log: &WriteLog) -> [MockPin; 8] {
    core::array::from_fn(|index| log.pin(PinId::Segment(index as u8)))
}

/// A driver with `digit_count` registered displays; the construction-time
/// writes are drained from the log.
pub fn mux_with_displays(
    log: &WriteLog,
    digit_count: u8,
    config: MuxConfig,
) -> (SegMux<MockPin>, Vec<DisplayHandle>) {
    let mut mux = SegMux::new(segment_bank(log), config).expect("mock pins never fail");
    let handles = (0..digit_count)
        .map(|index| {
            mux.register_display(log.pin(PinId::Digit(index)))
                .expect("capacity is not exceeded")
        })
        .collect();
    log.take();
    (mux, handles)
}

/// The digit line enabled by the writes of one tick, checking it is the
/// only one and that every digit line was first driven off.
pub fn enabled_digit(writes: &[Write]) -> u8 {
    let enables: Vec<u8> = writes
        .iter()
        .filter_map(|&(id, on)| match id {
            PinId::Digit(index) if on => Some(index),
            _ => None,
        })
        .collect();
    assert_eq!(enables.len(), 1, "exactly one digit line enabled per tick");
    enables[0]
}

/// The segment pattern driven during the writes of one tick.
pub fn driven_pattern(writes: &[Write]) -> u8 {
    let mut pattern = 0u8;
    for &(id, on) in writes {
        if let PinId::Segment(index) = id {
            if on {
                pattern |= 1 << index;
            } else {
                pattern &= !(1 << index);
            }
        }
    }
    pattern
}
