//! SPI register abstractions
//!
//! The transaction engine in `tether-drivers` drives an SPI peripheral one
//! byte at a time through these primitives and bounds every wait itself.

/// Status flags and data register of an SPI master
///
/// None of these calls may block. Status reads must be side-effect free so
/// they can be polled repeatedly.
pub trait SpiRegisters {
    /// Transmit buffer can accept a byte (TXE)
    fn tx_ready(&self) -> bool;

    /// Shift register idle, last byte fully clocked out (!BSY)
    fn tx_complete(&self) -> bool;

    /// A received byte is waiting in the data register (RXNE)
    fn rx_ready(&self) -> bool;

    /// Write one byte to the data register
    fn put_byte(&mut self, byte: u8);

    /// Read one byte from the data register
    fn get_byte(&mut self) -> u8;
}
