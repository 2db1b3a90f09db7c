//! Link-level frame reception
//!
//! The codec reports each read in isolation. The receiver here remembers
//! how the last few went and decides when the stream has lost alignment.

pub mod receiver;

pub use receiver::{FrameReceiver, ReceiveError};

/// Alignment state of the receive path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// Reads are assumed to start on a frame boundary
    Synced,
    /// Hunting for a header in the raw stream
    Resyncing,
}

/// Running counters for one receiver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    pub frames: u32,
    pub malformed: u32,
    pub channel_errors: u32,
    pub resync_attempts: u32,
    /// Resync windows that contained no header at all
    pub sync_misses: u32,
}
