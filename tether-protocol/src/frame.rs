//! Frame encoding and decoding.
//!
//! Frame format (all fields 16-bit little-endian, see [`crate::layout`]):
//! - HEADER (2 bytes): 0x4020, on the wire `0x20 0x40`
//! - CHANNELS (28 bytes): 14 channel values
//! - CHECKSUM (2 bytes): 0xFFFF minus header minus every channel, wrapping

use crate::layout::{SlotKind, CHECKSUM_SLOT, HEADER_SLOT, LAYOUT};

/// Frame header constant
pub const HEADER: u16 = 0x4020;

/// Number of payload channels per frame
pub const CHANNEL_COUNT: usize = 14;

/// Complete frame size (HEADER + CHANNELS + CHECKSUM)
pub const FRAME_LEN: usize = 2 + 2 * CHANNEL_COUNT + 2;

/// Errors that can occur while decoding a frame from bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Fewer than [`FRAME_LEN`] bytes supplied
    Incomplete,
    /// Structurally complete frame whose trailer does not match its contents
    InvalidChecksum {
        /// Checksum computed over header and channels
        expected: u16,
        /// Trailer as received
        found: u16,
    },
}

/// Checksum for a header and channel set
///
/// `0xFFFF - header - Σ channels`, all in wrapping 16-bit arithmetic.
pub fn checksum(header: u16, channels: &[u16; CHANNEL_COUNT]) -> u16 {
    channels
        .iter()
        .fold(0xFFFFu16.wrapping_sub(header), |acc, &ch| acc.wrapping_sub(ch))
}

/// One frame
///
/// Transient: built by the sender right before [`Frame::encode`], or
/// produced by [`Frame::decode`] and consumed by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub header: u16,
    pub channels: [u16; CHANNEL_COUNT],
    pub checksum: u16,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new([0; CHANNEL_COUNT])
    }
}

impl Frame {
    /// Create a sealed frame carrying `channels`
    pub fn new(channels: [u16; CHANNEL_COUNT]) -> Self {
        let mut frame = Self {
            header: HEADER,
            channels,
            checksum: 0,
        };
        frame.seal();
        frame
    }

    /// Force the protocol header and recompute the trailer
    pub fn seal(&mut self) {
        self.header = HEADER;
        self.checksum = checksum(self.header, &self.channels);
    }

    /// Checksum the current header and channels would need
    pub fn expected_checksum(&self) -> u16 {
        checksum(self.header, &self.channels)
    }

    /// Whether the trailer matches the contents
    pub fn is_valid(&self) -> bool {
        self.checksum == self.expected_checksum()
    }

    /// Seal the frame and serialize it into wire bytes
    ///
    /// The header field is overwritten with [`HEADER`] whatever it held.
    pub fn encode(&mut self) -> [u8; FRAME_LEN] {
        self.seal();
        self.to_bytes()
    }

    /// Serialize fields as they are, without sealing
    pub fn to_bytes(&self) -> [u8; FRAME_LEN] {
        let mut bytes = [0u8; FRAME_LEN];
        for slot in LAYOUT.iter() {
            let value = match slot.kind {
                SlotKind::Header => self.header,
                SlotKind::Channel(i) => self.channels[i as usize],
                SlotKind::Checksum => self.checksum,
            };
            slot.write(&mut bytes, value);
        }
        bytes
    }

    /// Parse fields out of wire bytes without validating
    pub fn from_bytes(bytes: &[u8; FRAME_LEN]) -> Self {
        let mut frame = Self {
            header: HEADER_SLOT.read(bytes),
            channels: [0; CHANNEL_COUNT],
            checksum: CHECKSUM_SLOT.read(bytes),
        };
        for slot in LAYOUT.iter() {
            if let SlotKind::Channel(i) = slot.kind {
                frame.channels[i as usize] = slot.read(bytes);
            }
        }
        frame
    }

    /// Parse and validate the first [`FRAME_LEN`] bytes of `bytes`
    ///
    /// Only the checksum is checked. A misaligned window almost never sums
    /// correctly, which is what resynchronization relies on.
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        let raw: &[u8; FRAME_LEN] = bytes
            .get(..FRAME_LEN)
            .and_then(|b| b.try_into().ok())
            .ok_or(FrameError::Incomplete)?;

        let frame = Self::from_bytes(raw);
        let expected = frame.expected_checksum();
        if frame.checksum != expected {
            return Err(FrameError::InvalidChecksum {
                expected,
                found: frame.checksum,
            });
        }
        Ok(frame)
    }
}
