//! Peripheral driver implementations
//!
//! Concrete drivers on top of the register traits in tether-hal. Every wait
//! on a status flag is bounded by a [`tether_core::PollBudget`]:
//!
//! - SPI transaction engine (also an `embedded-hal` `SpiBus`)
//! - Chip-select helper and bus line routing
//! - Polling UART byte channel
//! - `embedded-io` byte channel adapter

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod lines;
pub mod spi;
pub mod uart;
pub mod wait;

pub use lines::{configure_spi_lines, configure_uart_lines};
pub use spi::{ChipSelect, SpiEngine, TransactionError};
pub use uart::{ChannelError, IoChannel, IoChannelError, PollingUart};
pub use wait::{Stage, Timeout};
