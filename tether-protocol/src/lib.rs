//! Channel frame protocol
//!
//! This crate defines the fixed-length frame carried over a serial byte
//! stream (14 × 16-bit channel values, as sent by RC receivers) and the
//! machinery to recover it from a stream of unknown alignment.
//!
//! # Protocol Overview
//!
//! Every frame is exactly 32 bytes, all fields little-endian:
//! ```text
//! ┌──────────┬──────────────────────────────┬──────────┐
//! │ HEADER   │ CH0 CH1 ... CH13             │ CHECKSUM │
//! │ 2B 0x4020│ 14 × 2B                      │ 2B       │
//! └──────────┴──────────────────────────────┴──────────┘
//! ```
//!
//! `CHECKSUM = 0xFFFF - HEADER - Σ CHn` in wrapping 16-bit arithmetic, so
//! the sum of all sixteen words is always `0xFFFF` for a good frame.
//!
//! Receivers can start listening mid-frame. [`resynchronize`] finds the next
//! header in a window of raw bytes, and [`FrameScanner`] does the same job
//! one byte at a time for interrupt-driven receive paths.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod codec;
pub mod frame;
pub mod layout;
pub mod scanner;
pub mod sync;

pub use codec::{CodecError, FrameCodec};
pub use frame::{checksum, Frame, FrameError, CHANNEL_COUNT, FRAME_LEN, HEADER};
pub use layout::{Endian, Slot, SlotKind, LAYOUT};
pub use scanner::FrameScanner;
pub use sync::{find_header, resynchronize, HEADER_BYTES};
