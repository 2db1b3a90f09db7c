//! SPI transaction engine (polled, bounded)
//!
//! Drives an SPI master one byte at a time through [`SpiRegisters`]. Each
//! status wait gets the same [`PollBudget`]; running out aborts the
//! transaction with a [`Timeout`] naming the stage and byte position. The
//! peripheral is left as it is on timeout: recovering (deselect, flush,
//! retry) is up to the caller.
//!
//! # Preconditions
//!
//! The target device must already be selected. The engine never touches
//! chip select; see [`super::ChipSelect`].
//!
//! # Sharing
//!
//! Every operation takes `&mut self`, so one engine runs one transaction at
//! a time. Sharing a peripheral across execution contexts needs a lock or a
//! single owning task around the engine.

use embedded_hal::spi::{ErrorKind, ErrorType, SpiBus};
use tether_core::{LinkConfig, PollBudget};
use tether_hal::SpiRegisters;

use crate::wait::{wait_for, Stage, Timeout};

/// Fill byte clocked out by [`SpiBus::read`]
pub const DEFAULT_FILL: u8 = 0x00;

/// SPI transaction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransactionError {
    /// A status flag never came up within the poll budget
    Timeout(Timeout),
    /// Zero-length transfer requested; no register was touched
    InvalidArgument,
}

impl From<Timeout> for TransactionError {
    fn from(t: Timeout) -> Self {
        TransactionError::Timeout(t)
    }
}

impl embedded_hal::spi::Error for TransactionError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Polled SPI master
pub struct SpiEngine<R> {
    regs: R,
    budget: PollBudget,
}

impl<R: SpiRegisters> SpiEngine<R> {
    /// Create an engine with an explicit poll budget
    pub fn new(regs: R, budget: PollBudget) -> Self {
        Self { regs, budget }
    }

    /// Create an engine using the SPI budget from `config`
    pub fn from_config(regs: R, config: &LinkConfig) -> Self {
        Self::new(regs, config.spi_poll_budget)
    }

    /// Poll budget applied to every status wait
    pub fn budget(&self) -> PollBudget {
        self.budget
    }

    /// Replace the poll budget for later transactions
    pub fn set_budget(&mut self, budget: PollBudget) {
        self.budget = budget;
    }

    /// Give the register block back
    pub fn release(self) -> R {
        self.regs
    }

    /// Transmit `data`, waiting for each byte to finish shifting out
    ///
    /// Received bytes are not read.
    pub fn write(&mut self, data: &[u8]) -> Result<(), TransactionError> {
        if data.is_empty() {
            return Err(TransactionError::InvalidArgument);
        }
        self.write_bytes(data)
    }

    /// Clock `fill` out once per byte of `out` and store each response
    ///
    /// On timeout, `out` holds the bytes received before the failing index
    /// and is unchanged from there on.
    pub fn write_then_read(&mut self, fill: u8, out: &mut [u8]) -> Result<(), TransactionError> {
        if out.is_empty() {
            return Err(TransactionError::InvalidArgument);
        }
        for (index, slot) in out.iter_mut().enumerate() {
            *slot = self.exchange(fill, index)?;
        }
        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), TransactionError> {
        for (index, &byte) in data.iter().enumerate() {
            self.wait(Stage::TxReady, index)?;
            self.regs.put_byte(byte);
            self.wait(Stage::TxComplete, index)?;
        }
        Ok(())
    }

    /// One full-duplex byte: send `byte`, return what came back
    fn exchange(&mut self, byte: u8, index: usize) -> Result<u8, TransactionError> {
        self.wait(Stage::TxReady, index)?;
        self.regs.put_byte(byte);
        self.wait(Stage::RxReady, index)?;
        Ok(self.regs.get_byte())
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

impl<R: SpiRegisters> ErrorType for SpiEngine<R> {
    type Error = TransactionError;
}

/// Lets `embedded-hal` device drivers run on the engine.
///
/// Empty buffers are no-ops here, as the trait expects, rather than
/// [`TransactionError::InvalidArgument`].
impl<R: SpiRegisters> SpiBus<u8> for SpiEngine<R> {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for (index, slot) in words.iter_mut().enumerate() {
            *slot = self.exchange(DEFAULT_FILL, index)?;
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.write_bytes(words)
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        for index in 0..read.len().max(write.len()) {
            let out = write.get(index).copied().unwrap_or(DEFAULT_FILL);
            let received = self.exchange(out, index)?;
            if let Some(slot) = read.get_mut(index) {
                *slot = received;
            }
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for (index, word) in words.iter_mut().enumerate() {
            *word = self.exchange(*word, index)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.wait(Stage::TxComplete, 0)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use core::cell::Cell;
    use std::collections::VecDeque;
    use std::vec::Vec;

    /// Fake SPI register bank
    ///
    /// Every `put_byte` latches the next scripted reply (or echoes the byte)
    /// into the receive register. Flags can be jammed to simulate a hung
    /// peripheral.
    #[derive(Default)]
    pub struct MockSpi {
        pub tx_stuck: bool,
        pub busy_stuck: bool,
        /// Stop raising RXNE after this many received bytes
        pub rx_limit: Option<usize>,
        pub replies: VecDeque<u8>,
        pub sent: Vec<u8>,
        pub received: usize,
        pub rx_pending: Option<u8>,
        pub tx_polls: Cell<u32>,
        pub busy_polls: Cell<u32>,
        pub rx_polls: Cell<u32>,
    }

    impl MockSpi {
        pub fn with_replies(replies: &[u8]) -> Self {
            Self {
                replies: replies.iter().copied().collect(),
                ..Self::default()
            }
        }

        pub fn total_polls(&self) -> u32 {
            self.tx_polls.get() + self.busy_polls.get() + self.rx_polls.get()
        }
    }

    impl SpiRegisters for MockSpi {
        fn tx_ready(&self) -> bool {
            self.tx_polls.set(self.tx_polls.get() + 1);
            !self.tx_stuck
        }

        fn tx_complete(&self) -> bool {
            self.busy_polls.set(self.busy_polls.get() + 1);
            !self.busy_stuck
        }

        fn rx_ready(&self) -> bool {
            self.rx_polls.set(self.rx_polls.get() + 1);
            let limited = self.rx_limit.is_some_and(|limit| self.received >= limit);
            self.rx_pending.is_some() && !limited
        }

        fn put_byte(&mut self, byte: u8) {
            self.sent.push(byte);
            self.rx_pending = Some(self.replies.pop_front().unwrap_or(byte));
        }

        fn get_byte(&mut self) -> u8 {
            self.received += 1;
            self.rx_pending.take().unwrap_or(0)
        }
    }

    const BUDGET: PollBudget = PollBudget::new(50);

    #[test]
    fn test_write_sends_in_order() {
        let mut spi = SpiEngine::new(MockSpi::default(), BUDGET);
        assert_eq!(spi.write(&[0x9F, 0x01, 0x02]), Ok(()));

        let regs = spi.release();
        assert_eq!(regs.sent, [0x9F, 0x01, 0x02]);
        assert_eq!(regs.tx_polls.get(), 3);
        assert_eq!(regs.busy_polls.get(), 3);
        assert_eq!(regs.received, 0);
    }

    #[test]
    fn test_write_empty_is_invalid() {
        let mut spi = SpiEngine::new(MockSpi::default(), BUDGET);
        assert_eq!(spi.write(&[]), Err(TransactionError::InvalidArgument));
        assert_eq!(spi.write_then_read(0xFF, &mut []), Err(TransactionError::InvalidArgument));
        assert_eq!(spi.release().total_polls(), 0);
    }

    #[test]
    fn test_write_times_out_after_exact_budget() {
        let regs = MockSpi {
            tx_stuck: true,
            ..MockSpi::default()
        };
        let mut spi = SpiEngine::new(regs, BUDGET);

        assert_eq!(
            spi.write(&[0x01, 0x02]),
            Err(TransactionError::Timeout(Timeout {
                stage: Stage::TxReady,
                index: 0,
            }))
        );
        let regs = spi.release();
        assert_eq!(regs.tx_polls.get(), BUDGET.get());
        assert!(regs.sent.is_empty());
    }

    #[test]
    fn test_write_busy_never_clears() {
        let regs = MockSpi {
            busy_stuck: true,
            ..MockSpi::default()
        };
        let mut spi = SpiEngine::new(regs, BUDGET);

        assert_eq!(
            spi.write(&[0xAB, 0xCD]),
            Err(TransactionError::Timeout(Timeout {
                stage: Stage::TxComplete,
                index: 0,
            }))
        );
        let regs = spi.release();
        assert_eq!(regs.sent, [0xAB]);
        assert_eq!(regs.busy_polls.get(), BUDGET.get());
    }

    #[test]
    fn test_write_then_read_collects_replies() {
        let mut spi = SpiEngine::new(MockSpi::with_replies(&[0xEF, 0x40, 0x18]), BUDGET);
        let mut id = [0u8; 3];
        assert_eq!(spi.write_then_read(0xFF, &mut id), Ok(()));
        assert_eq!(id, [0xEF, 0x40, 0x18]);
        assert_eq!(spi.release().sent, [0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_write_then_read_rx_never_ready() {
        let regs = MockSpi {
            rx_limit: Some(0),
            ..MockSpi::default()
        };
        let mut spi = SpiEngine::new(regs, BUDGET);
        let mut out = [0u8; 4];

        assert_eq!(
            spi.write_then_read(0x00, &mut out),
            Err(TransactionError::Timeout(Timeout {
                stage: Stage::RxReady,
                index: 0,
            }))
        );
        assert_eq!(spi.release().rx_polls.get(), BUDGET.get());
    }

    #[test]
    fn test_write_then_read_keeps_partial_output() {
        let regs = MockSpi {
            rx_limit: Some(2),
            ..MockSpi::with_replies(&[0x11, 0x22, 0x33, 0x44])
        };
        let mut spi = SpiEngine::new(regs, BUDGET);
        let mut out = [0u8; 4];

        assert_eq!(
            spi.write_then_read(0xFF, &mut out),
            Err(TransactionError::Timeout(Timeout {
                stage: Stage::RxReady,
                index: 2,
            }))
        );
        assert_eq!(out, [0x11, 0x22, 0x00, 0x00]);
        // Third fill byte went out before the wait failed
        assert_eq!(spi.release().sent.len(), 3);
    }

    #[test]
    fn test_zero_budget_times_out_without_polling() {
        let mut spi = SpiEngine::new(MockSpi::default(), PollBudget::new(0));
        assert!(matches!(spi.write(&[0x01]), Err(TransactionError::Timeout(_))));
        assert_eq!(spi.release().total_polls(), 0);
    }

    #[test]
    fn test_budget_from_config() {
        let config = LinkConfig::default().with_spi_poll_budget(PollBudget::new(7));
        let spi = SpiEngine::from_config(MockSpi::default(), &config);
        assert_eq!(spi.budget().get(), 7);
    }

    #[test]
    fn test_spibus_transfer_uneven_lengths() {
        let mut spi = SpiEngine::new(MockSpi::with_replies(&[0xA0, 0xA1, 0xA2]), BUDGET);
        let mut read = [0u8; 3];
        SpiBus::transfer(&mut spi, &mut read, &[0x05]).unwrap();

        assert_eq!(read, [0xA0, 0xA1, 0xA2]);
        assert_eq!(spi.release().sent, [0x05, DEFAULT_FILL, DEFAULT_FILL]);
    }

    #[test]
    fn test_spibus_transfer_in_place_and_flush() {
        let mut spi = SpiEngine::new(MockSpi::with_replies(&[0x10, 0x20]), BUDGET);
        let mut words = [0x01, 0x02];
        SpiBus::transfer_in_place(&mut spi, &mut words).unwrap();
        SpiBus::flush(&mut spi).unwrap();

        assert_eq!(words, [0x10, 0x20]);
        assert_eq!(spi.release().sent, [0x01, 0x02]);
    }

    #[test]
    fn test_spibus_empty_is_noop() {
        let mut spi = SpiEngine::new(MockSpi::default(), BUDGET);
        assert_eq!(SpiBus::write(&mut spi, &[]), Ok(()));
        assert_eq!(SpiBus::read(&mut spi, &mut []), Ok(()));
        assert_eq!(spi.release().total_polls(), 0);
    }
}
