//! Active-low chip select

use tether_hal::{DataLine, LineConfig, OutputPin};

/// Chip-select line for one SPI device
///
/// Selection is the caller's job; the engine assumes it already happened.
/// [`ChipSelect::with_selected`] brackets a closure so deselect cannot be
/// forgotten on the error path.
pub struct ChipSelect<P> {
    pin: P,
}

impl<P: OutputPin + DataLine> ChipSelect<P> {
    /// Configure `pin` as a push-pull output and leave the device deselected
    pub fn new(mut pin: P) -> Self {
        pin.configure(LineConfig::PUSH_PULL_OUTPUT);
        pin.set_high();
        Self { pin }
    }

    /// Drive the line low
    pub fn select(&mut self) {
        self.pin.set_low();
    }

    /// Drive the line high
    pub fn deselect(&mut self) {
        self.pin.set_high();
    }

    /// Whether the line is currently driven low
    pub fn is_selected(&self) -> bool {
        self.pin.is_set_low()
    }

    /// Run `f` with the device selected, deselecting afterwards whatever `f`
    /// returned
    pub fn with_selected<T>(&mut self, f: impl FnOnce() -> T) -> T {
        self.select();
        let result = f();
        self.deselect();
        result
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}
