//! Polling ceiling
//!
//! A budget counts status reads, not time. The wall-clock bound it gives
//! depends on core clock and bus wait states, so it is a per-board setting.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default SPI budget: several byte times at 1 MHz SCK on a 48 MHz core
pub const DEFAULT_SPI_POLL_BUDGET: u32 = 1_000;

/// Default UART budget: covers the idle gap between frames at 115200 baud
pub const DEFAULT_UART_POLL_BUDGET: u32 = 200_000;

/// Maximum number of status polls before a wait times out
///
/// Zero is allowed and times out without touching the status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PollBudget(u32);

impl PollBudget {
    /// Budget of `polls` status reads per wait
    pub const fn new(polls: u32) -> Self {
        Self(polls)
    }

    /// Number of status reads allowed
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Poll `ready` until it returns true or the budget runs out
    ///
    /// Returns whether the condition was seen. `ready` is called at most
    /// `self.get()` times and never again after it returns true.
    pub fn poll_until(self, mut ready: impl FnMut() -> bool) -> bool {
        (0..self.0).any(|_| ready())
    }
}
