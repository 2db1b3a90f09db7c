//! GPIO line abstractions
//!
//! Pin initialization itself is board glue. The stack only needs two
//! capabilities: configure a line, and drive an output (chip select).

/// Line function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineMode {
    /// Push-pull digital output driven by software
    Output,
    /// Routed to a peripheral (alternate function number)
    Alternate(u8),
}

/// Internal pull resistor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    None,
    Up,
}

/// Output slew rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    Low,
    High,
}

/// Complete configuration for one data line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineConfig {
    pub mode: LineMode,
    pub pull: Pull,
    pub speed: Speed,
}

impl LineConfig {
    /// Push-pull output, no pull, fast edges (chip select lines)
    pub const PUSH_PULL_OUTPUT: Self = Self {
        mode: LineMode::Output,
        pull: Pull::None,
        speed: Speed::High,
    };

    /// Peripheral-routed line, no pull, fast edges
    pub const fn alternate(function: u8) -> Self {
        Self {
            mode: LineMode::Alternate(function),
            pull: Pull::None,
            speed: Speed::High,
        }
    }

    /// Same line with a different pull resistor
    pub const fn with_pull(mut self, pull: Pull) -> Self {
        self.pull = pull;
        self
    }

    /// Same line with a different slew rate
    pub const fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }
}

/// Opaque "configure a data line" capability
///
/// Implementations write the chip's mode/pull/speed/alternate-function
/// registers. Nothing above the HAL looks at how.
pub trait DataLine {
    fn configure(&mut self, config: LineConfig);
}

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}
