//! Board-agnostic link logic for the Tether transport stack
//!
//! This crate contains everything above the frame codec that does not depend
//! on specific hardware:
//!
//! - Configuration (poll budgets, recovery policy) and its persistence
//! - Link receiver: consecutive-failure tracking and resynchronization

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod link;

pub use config::{ConfigError, LinkConfig, PollBudget};
pub use link::{FrameReceiver, LinkState, LinkStats, ReceiveError};
