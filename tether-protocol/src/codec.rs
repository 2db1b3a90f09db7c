//! Frame codec over a byte channel.
//!
//! Stateless between calls: each [`FrameCodec::decode`] is one frame-length
//! read followed by checksum validation. Alignment tracking and recovery
//! belong to the caller (see `tether-core`'s link receiver).

use tether_hal::ByteChannel;

use crate::frame::{Frame, FrameError, FRAME_LEN};

/// Codec outcome other than success
///
/// Channel failures and corrupt frames are kept apart: the first usually
/// calls for a retry, the second for resynchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError<E> {
    /// The byte channel failed; passed through untouched
    Channel(E),
    /// A full frame arrived but its checksum does not match
    Malformed {
        expected: u16,
        found: u16,
    },
    /// Fewer than a frame's worth of bytes to validate
    Incomplete,
}

/// Encoder/decoder bound to one byte channel
pub struct FrameCodec<C> {
    channel: C,
}

impl<C: ByteChannel> FrameCodec<C> {
    /// Create a codec that owns `channel`
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    /// Borrow the underlying channel
    pub fn channel(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Give the channel back
    pub fn release(self) -> C {
        self.channel
    }

    /// Seal `frame` and send it in a single channel write
    ///
    /// On return `frame` carries the protocol header and the trailer that
    /// was transmitted.
    pub fn encode(&mut self, frame: &mut Frame) -> Result<(), CodecError<C::Error>> {
        let bytes = frame.encode();
        self.channel.send(&bytes).map_err(CodecError::Channel)
    }

    /// Read one frame-length block and validate it
    pub fn decode(&mut self) -> Result<Frame, CodecError<C::Error>> {
        let mut bytes = [0u8; FRAME_LEN];
        self.channel
            .receive(&mut bytes)
            .map_err(CodecError::Channel)?;
        Self::validate(&bytes)
    }

    /// Validate an already-received frame-length block
    pub fn validate(bytes: &[u8; FRAME_LEN]) -> Result<Frame, CodecError<C::Error>> {
        Frame::decode(bytes).map_err(CodecError::from)
    }
}

impl<E> From<FrameError> for CodecError<E> {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::InvalidChecksum { expected, found } => {
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "frame rejected: checksum {=u16:#x} != {=u16:#x}",
                    found,
                    expected
                );
                CodecError::Malformed { expected, found }
            }
            FrameError::Incomplete => CodecError::Incomplete,
        }
    }
}
