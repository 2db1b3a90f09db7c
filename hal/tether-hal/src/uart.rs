//! UART serial communication abstractions
//!
//! Two layers: the raw register interface a chip HAL implements, and the
//! byte channel the frame codec consumes.

/// Receiver line error latched by the UART
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Stop bit not found
    Framing,
    /// Noise detected on a sample
    Noise,
    /// Byte arrived before the previous one was read
    Overrun,
    /// Parity mismatch
    Parity,
}

/// Status flags and data register of a UART
///
/// Same shape as [`crate::spi::SpiRegisters`], plus error reporting.
pub trait UartRegisters {
    /// Transmit data register empty
    fn tx_ready(&self) -> bool;

    /// Transmission complete (shift register empty)
    fn tx_complete(&self) -> bool;

    /// Received byte available
    fn rx_ready(&self) -> bool;

    /// Write one byte to the transmit data register
    fn put_byte(&mut self, byte: u8);

    /// Read one byte from the receive data register
    fn get_byte(&mut self) -> u8;

    /// Take and clear a latched receiver error, if any
    fn take_error(&mut self) -> Option<LineError> {
        None
    }
}

/// Blocking byte channel
///
/// Moves whole buffers or fails. `receive` leaves the buffer contents
/// unspecified on error.
pub trait ByteChannel {
    /// Error type for channel operations
    type Error;

    /// Send every byte of `data`
    fn send(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Fill `buf` completely
    fn receive(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;
}

impl<T: ByteChannel + ?Sized> ByteChannel for &mut T {
    type Error = T::Error;

    fn send(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).send(data)
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).receive(buf)
    }
}
