//! Byte-at-a-time frame recovery.
//!
//! For receive paths that get one byte per interrupt instead of a block.
//! The scanner hunts for the header pair, collects the rest of the frame,
//! then validates it. Like [`crate::resynchronize`], it trusts the first
//! header pair it sees.

use heapless::Vec;

use crate::frame::{Frame, FrameError, FRAME_LEN};
use crate::sync::HEADER_BYTES;

/// State machine for recovering frames from a byte stream
#[derive(Debug, Clone)]
pub struct FrameScanner {
    state: ScanState,
    buffer: Vec<u8, FRAME_LEN>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Waiting for the header low byte
    AwaitingHeaderLow,
    /// Got the low byte, waiting for the high byte
    AwaitingHeaderHigh,
    /// Header matched, filling the frame buffer
    Collecting,
}

impl Default for FrameScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScanner {
    /// Create a new frame scanner
    pub fn new() -> Self {
        Self {
            state: ScanState::AwaitingHeaderLow,
            buffer: Vec::new(),
        }
    }

    /// Drop any partial frame and start hunting again
    pub fn reset(&mut self) {
        self.state = ScanState::AwaitingHeaderLow;
        self.buffer.clear();
    }

    /// Whether the scanner is locked onto a header
    pub fn is_collecting(&self) -> bool {
        self.state == ScanState::Collecting
    }

    /// Feed a single byte to the scanner
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is assembled,
    /// `Ok(None)` when more bytes are needed, or `Err` when a complete frame
    /// failed its checksum. The scanner resets after either outcome.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ScanState::AwaitingHeaderLow => {
                if byte == HEADER_BYTES[0] {
                    self.state = ScanState::AwaitingHeaderHigh;
                }
                Ok(None)
            }
            ScanState::AwaitingHeaderHigh => {
                if byte == HEADER_BYTES[1] {
                    self.buffer.clear();
                    // Capacity is FRAME_LEN, two bytes always fit
                    let _ = self.buffer.extend_from_slice(&HEADER_BYTES);
                    self.state = ScanState::Collecting;
                } else if byte != HEADER_BYTES[0] {
                    self.state = ScanState::AwaitingHeaderLow;
                }
                Ok(None)
            }
            ScanState::Collecting => {
                let _ = self.buffer.push(byte);
                if self.buffer.len() < FRAME_LEN {
                    return Ok(None);
                }

                let result = Frame::decode(&self.buffer);
                self.reset();
                result.map(Some)
            }
        }
    }

    /// Feed multiple bytes to the scanner
    ///
    /// Stops at the first complete frame or checksum failure and returns it
    /// together with the number of bytes consumed. Remaining bytes are left
    /// for the next call.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> (usize, Result<Option<Frame>, FrameError>) {
        for (i, &byte) in bytes.iter().enumerate() {
            match self.feed(byte) {
                Ok(None) => continue,
                outcome => return (i + 1, outcome),
            }
        }
        (bytes.len(), Ok(None))
    }
}
