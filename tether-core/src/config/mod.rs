//! Configuration types
//!
//! Board-agnostic link settings. Stored in flash as postcard-serialized
//! binary data when the `serde` feature is enabled.

pub mod budget;

#[cfg(feature = "serde")]
mod persist;

pub use budget::{PollBudget, DEFAULT_SPI_POLL_BUDGET, DEFAULT_UART_POLL_BUDGET};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Consecutive failures before the receiver hunts for a header
pub const DEFAULT_RESYNC_THRESHOLD: u8 = 3;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Resync threshold must be at least one failure
    InvalidThreshold,
    /// Output buffer too small or serialization failed
    Serialize,
    /// Stored bytes could not be decoded
    Deserialize,
    /// Stored data was written by a different config layout
    VersionMismatch,
}

/// Link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    /// Status polls per wait in SPI transactions
    pub spi_poll_budget: PollBudget,
    /// Status polls per wait on the serial byte channel
    pub uart_poll_budget: PollBudget,
    /// Consecutive bad reads before switching to resync mode
    pub resync_threshold: u8,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            spi_poll_budget: PollBudget::new(DEFAULT_SPI_POLL_BUDGET),
            uart_poll_budget: PollBudget::new(DEFAULT_UART_POLL_BUDGET),
            resync_threshold: DEFAULT_RESYNC_THRESHOLD,
        }
    }
}

impl LinkConfig {
    /// Override the SPI status-wait budget
    pub const fn with_spi_poll_budget(mut self, budget: PollBudget) -> Self {
        self.spi_poll_budget = budget;
        self
    }

    /// Override the UART status-wait budget
    pub const fn with_uart_poll_budget(mut self, budget: PollBudget) -> Self {
        self.uart_poll_budget = budget;
        self
    }

    /// Override the consecutive-failure count that triggers a resync
    pub const fn with_resync_threshold(mut self, threshold: u8) -> Self {
        self.resync_threshold = threshold;
        self
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resync_threshold == 0 {
            return Err(ConfigError::InvalidThreshold);
        }
        Ok(())
    }
}
