//! SPI driver implementations

pub mod engine;
pub mod select;

pub use engine::{SpiEngine, TransactionError};
pub use select::ChipSelect;
