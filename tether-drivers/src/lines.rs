//! Bus line setup
//!
//! Routes the data lines of a bus to their peripheral before the engine or
//! channel takes over. Chip select is handled by [`crate::ChipSelect`].

use tether_hal::{DataLine, LineConfig, Pull, Speed};

/// Route SCK, MOSI and MISO to the SPI peripheral
///
/// MISO gets a pull-up so it reads idle-high while no device drives it.
pub fn configure_spi_lines(
    sck: &mut impl DataLine,
    mosi: &mut impl DataLine,
    miso: &mut impl DataLine,
    function: u8,
) {
    let line = LineConfig::alternate(function);
    sck.configure(line);
    mosi.configure(line);
    miso.configure(line.with_pull(Pull::Up));
}

/// Route TX and RX to the UART peripheral
///
/// Serial rates need no fast edges. RX is pulled up to hold the idle level
/// when the remote end is unplugged.
pub fn configure_uart_lines(tx: &mut impl DataLine, rx: &mut impl DataLine, function: u8) {
    let line = LineConfig::alternate(function).with_speed(Speed::Low);
    tx.configure(line);
    rx.configure(line.with_pull(Pull::Up));
}
