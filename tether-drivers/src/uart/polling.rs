//! Polled UART byte channel
//!
//! Same discipline as the SPI engine: every flag wait is bounded by a
//! [`PollBudget`]. The UART budget has to cover the gap between incoming
//! frames, so it is usually much larger than the SPI one.

use tether_core::{LinkConfig, PollBudget};
use tether_hal::{ByteChannel, LineError, UartRegisters};

use crate::wait::{wait_for, Stage, Timeout};

/// Byte channel errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelError {
    /// A status flag never came up within the poll budget
    Timeout(Timeout),
    /// The receiver flagged a line error on this byte
    Line { error: LineError, index: usize },
    /// Zero-length send or receive
    InvalidArgument,
}

impl From<Timeout> for ChannelError {
    fn from(t: Timeout) -> Self {
        ChannelError::Timeout(t)
    }
}

/// UART driven by status polling
pub struct PollingUart<R> {
    regs: R,
    budget: PollBudget,
}

impl<R: UartRegisters> PollingUart<R> {
    /// Create a channel with an explicit poll budget
    pub fn new(regs: R, budget: PollBudget) -> Self {
        Self { regs, budget }
    }

    /// Create a channel using the UART budget from `config`
    pub fn from_config(regs: R, config: &LinkConfig) -> Self {
        Self::new(regs, config.uart_poll_budget)
    }

    /// Give the register block back
    pub fn release(self) -> R {
        self.regs
    }

    fn wait(&self, stage: Stage, index: usize) -> Result<(), Timeout> {
        let regs = &self.regs;
        wait_for(self.budget, stage, index, || match stage {
            Stage::TxReady => regs.tx_ready(),
            Stage::TxComplete => regs.tx_complete(),
            Stage::RxReady => regs.rx_ready(),
        })
    }
}

impl<R: UartRegisters> ByteChannel for PollingUart<R> {
    type Error = ChannelError;

    /// Queue every byte, then wait for the line to go idle
    fn send(&mut self, data: &[u8]) -> Result<(), ChannelError> {
        if data.is_empty() {
            return Err(ChannelError::InvalidArgument);
        }
        for (index, &byte) in data.iter().enumerate() {
            self.wait(Stage::TxReady, index)?;
            self.regs.put_byte(byte);
        }
        self.wait(Stage::TxComplete, data.len() - 1)?;
        Ok(())
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<(), ChannelError> {
        if buf.is_empty() {
            return Err(ChannelError::InvalidArgument);
        }
        for (index, slot) in buf.iter_mut().enumerate() {
            self.wait(Stage::RxReady, index)?;
            // Reading the data register clears the flag either way
            let byte = self.regs.get_byte();
            if let Some(error) = self.regs.take_error() {
                #[cfg(feature = "defmt")]
                defmt::debug!("uart {} at byte {=usize}", error, index);
                return Err(ChannelError::Line { error, index });
            }
            *slot = byte;
        }
        Ok(())
    }
}
