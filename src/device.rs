//! A device abstraction that runs the multiplexer as a background task.
//!
//! The task owns the driver and is the only code touching pins: it sleeps
//! for one multiplexing period, services one display, and starts over.
//! Application code never ticks anything; it signals complete updates
//! through a static notifier, and the task applies them between ticks, so
//! a tick always observes a fully written value.
//!
//! See [`MuxDisplay`] for the device abstraction and a usage example.

use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_rp::gpio::Output;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::{Duration, Timer};

use crate::Result;
use crate::error::Error;
use crate::glyphs::Glyph;
use crate::mux::{NUMBER_OFF, SegMux, max_number};
use crate::registry::DISPLAY_COUNT_MAX;

#[cfg(feature = "display-trace")]
use defmt::info;

/// Sleep duration between multiplexing updates.
pub const MULTIPLEX_SLEEP: Duration = Duration::from_millis(3);

/// A complete update for the bank; a newer update replaces a pending one.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MuxUpdate {
    /// Spread one number across the digits, least significant first.
    /// [`NUMBER_OFF`] blanks the bank.
    Number(u16),
    /// One glyph per display, first registered first.
    Glyphs([Glyph; DISPLAY_COUNT_MAX]),
}

/// Signal for sending updates to the [`MuxDisplay`] device.
pub type MuxNotifier = Signal<CriticalSectionRawMutex, MuxUpdate>;

/// A device abstraction for a multiplexed bank of seven-segment displays.
///
/// # Example
///
/// ```no_run
/// #![no_std]
/// #![no_main]
///
/// use embassy_rp::gpio::{Level, Output};
/// use sevseg_mux::{Error, MuxConfig, MuxDisplay, MuxNotifier, SegMux};
/// # use embassy_executor::Spawner;
/// # use core::panic::PanicInfo;
/// # #[panic_handler]
/// # fn panic(_: &PanicInfo) -> ! { loop {} }
///
/// async fn example(p: embassy_rp::Peripherals, spawner: Spawner) -> Result<(), Error> {
///     // Shared segment lines A-G plus the decimal point
///     let segment_pins = [
///         Output::new(p.PIN_5, Level::Low),
///         Output::new(p.PIN_6, Level::Low),
///         Output::new(p.PIN_7, Level::Low),
///         Output::new(p.PIN_8, Level::Low),
///         Output::new(p.PIN_9, Level::Low),
///         Output::new(p.PIN_10, Level::Low),
///         Output::new(p.PIN_11, Level::Low),
///         Output::new(p.PIN_12, Level::Low),
///     ];
///     let mut mux = SegMux::new(segment_pins, MuxConfig::default())?;
///
///     // One digit-select line per display, least significant digit first
///     mux.register_display(Output::new(p.PIN_1, Level::High))?;
///     mux.register_display(Output::new(p.PIN_2, Level::High))?;
///     mux.register_display(Output::new(p.PIN_3, Level::High))?;
///     mux.register_display(Output::new(p.PIN_4, Level::High))?;
///
///     static NOTIFIER: MuxNotifier = MuxDisplay::notifier();
///     let display = MuxDisplay::new(mux, &NOTIFIER, spawner)?;
///
///     display.write_number(1234)?;
///     Ok(())
/// }
/// ```
pub struct MuxDisplay<'a> {
    notifier: &'a MuxNotifier,
    display_count: usize,
}

impl MuxDisplay<'_> {
    /// Creates a notifier for the display.
    #[must_use]
    pub const fn notifier() -> MuxNotifier {
        Signal::new()
    }

    /// Creates the display device and spawns its background task.
    ///
    /// Register every display on `mux` before handing it over; the task
    /// owns the driver from here on.
    ///
    /// # Errors
    ///
    /// Returns an error if the task cannot be spawned.
    #[must_use = "Must be used to manage the spawned task"]
    pub fn new(
        mux: SegMux<Output<'static>>,
        notifier: &'static MuxNotifier,
        spawner: Spawner,
    ) -> Result<Self> {
        let display_count = mux.display_count();
        let token = device_loop(mux, notifier);
        spawner.spawn(token)?;
        Ok(Self {
            notifier,
            display_count,
        })
    }

    /// Shows `value` across the digits; [`NUMBER_OFF`] blanks the bank.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] when `value` exceeds what the
    /// registered digit count can show; nothing is sent to the device.
    pub fn write_number(&self, value: u16) -> Result<()> {
        if value != NUMBER_OFF && value > max_number(self.display_count) {
            return Err(Error::InvalidValue);
        }
        #[cfg(feature = "display-trace")]
        info!("write_number: {}", value);
        self.notifier.signal(MuxUpdate::Number(value));
        Ok(())
    }

    /// Shows one glyph per display, first registered first.
    pub fn write_glyphs(&self, glyphs: [Glyph; DISPLAY_COUNT_MAX]) {
        #[cfg(feature = "display-trace")]
        info!("write_glyphs: {:?}", glyphs);
        self.notifier.signal(MuxUpdate::Glyphs(glyphs));
    }

    /// Blanks the bank until the next update.
    pub fn off(&self) {
        self.notifier.signal(MuxUpdate::Number(NUMBER_OFF));
    }
}

#[embassy_executor::task]
async fn device_loop(mux: SegMux<Output<'static>>, notifier: &'static MuxNotifier) -> ! {
    match inner_device_loop(mux, notifier).await {
        Ok(infallible) => match infallible {},
        Err(err) => panic!("{err}"),
    }
}

async fn inner_device_loop(
    mut mux: SegMux<Output<'static>>,
    notifier: &'static MuxNotifier,
) -> Result<core::convert::Infallible> {
    loop {
        match select(notifier.wait(), Timer::after(MULTIPLEX_SLEEP)).await {
            Either::First(MuxUpdate::Number(value)) => mux.set_number(value)?,
            Either::First(MuxUpdate::Glyphs(glyphs)) => mux.set_glyphs(glyphs),
            Either::Second(()) => mux.tick()?,
        }
    }
}
