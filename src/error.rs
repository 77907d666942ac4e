use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[derive(Debug, Display, Error)]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that `embassy_executor::SpawnError` does
    // not implement Rust's `core::error::Error` trait.
    #[cfg(any(feature = "pico1", feature = "pico2"))]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    /// Zero digit-select pins, or more than the multiplexer can service.
    #[display("digit-select pin count is out of range")]
    Configuration,

    /// The fixed display capacity is already used up.
    #[display("display capacity already reached")]
    CapacityExceeded,

    /// A raw symbol code with no entry in the encoding table.
    #[display("symbol code is not in the encoding table")]
    InvalidSymbol,

    /// A number too large for the registered digit count.
    #[display("value does not fit the registered digit count")]
    InvalidValue,

    #[display("Index out of bounds")]
    IndexOutOfBounds,

    /// Writing a pin level failed. There is no recovery path for this;
    /// callers should treat it as fatal.
    #[display("Error setting output state")]
    CannotSetOutputState,
}

#[cfg(any(feature = "pico1", feature = "pico2"))]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}
