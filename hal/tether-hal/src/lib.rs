//! Tether Hardware Abstraction Layer
//!
//! This crate defines the hardware-facing traits the transport stack is
//! written against. Chip-specific HALs implement them on top of their
//! register blocks; tests implement them with fake register banks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tether-core (link receiver, config)    │
//! └─────────────────────────────────────────┘
//!          │                       │
//!          ▼                       ▼
//! ┌─────────────────┐     ┌─────────────────┐
//! │ tether-protocol │     │ tether-drivers  │
//! │ (frame codec)   │     │ (polling SPI,   │
//! │                 │     │  polling UART)  │
//! └─────────────────┘     └─────────────────┘
//!          │                       │
//!          └───────────┬───────────┘
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │  tether-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::DataLine`], [`gpio::OutputPin`] - Line configuration and digital output
//! - [`spi::SpiRegisters`] - SPI status flags and data register
//! - [`uart::UartRegisters`] - UART status flags, data register and line errors
//! - [`uart::ByteChannel`] - Send/receive N bytes, consumed by the frame codec

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{DataLine, LineConfig, LineMode, OutputPin, Pull, Speed};
pub use spi::SpiRegisters;
pub use uart::{ByteChannel, LineError, UartRegisters};
