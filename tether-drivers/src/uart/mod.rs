//! Serial byte channels
//!
//! Two [`tether_hal::ByteChannel`] implementations for the frame codec:
//! a register-level polling UART, and an adapter for any blocking
//! `embedded-io` reader/writer (chip HAL UART drivers, USB CDC, host ports).

pub mod io;
pub mod polling;

pub use io::{IoChannel, IoChannelError};
pub use polling::{ChannelError, PollingUart};
