//! Frame receiver with resynchronization
//!
//! While synced, each call is a plain codec decode. After
//! `resync_threshold` consecutive failures the receiver reads a raw window,
//! locks onto the first header pair in it, tops the frame up from the
//! channel and validates. Consuming exactly up to the end of that frame
//! leaves the stream aligned for the next synced read.

use tether_hal::ByteChannel;
use tether_protocol::{find_header, CodecError, Frame, FrameCodec, FRAME_LEN, HEADER_BYTES};

use super::{LinkState, LinkStats};
use crate::config::LinkConfig;

/// Receive outcome other than success
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiveError<E> {
    /// The byte channel failed
    Channel(E),
    /// A full frame arrived with a bad checksum
    Malformed { expected: u16, found: u16 },
    /// Resync window held no header pair
    NoSync,
    /// Fewer than a frame's worth of bytes reached validation
    Incomplete,
}

impl<E> From<CodecError<E>> for ReceiveError<E> {
    fn from(e: CodecError<E>) -> Self {
        match e {
            CodecError::Channel(e) => ReceiveError::Channel(e),
            CodecError::Malformed { expected, found } => {
                ReceiveError::Malformed { expected, found }
            }
            CodecError::Incomplete => ReceiveError::Incomplete,
        }
    }
}

/// Frame receiver over one byte channel
pub struct FrameReceiver<C> {
    codec: FrameCodec<C>,
    resync_threshold: u8,
    failures: u8,
    state: LinkState,
    stats: LinkStats,
}

impl<C: ByteChannel> FrameReceiver<C> {
    /// Create a receiver that assumes the stream starts aligned
    ///
    /// A zero threshold in `config` is treated as one.
    pub fn new(channel: C, config: &LinkConfig) -> Self {
        Self {
            codec: FrameCodec::new(channel),
            resync_threshold: config.resync_threshold.max(1),
            failures: 0,
            state: LinkState::Synced,
            stats: LinkStats::default(),
        }
    }

    /// Current link state
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Counters since construction
    pub fn stats(&self) -> &LinkStats {
        &self.stats
    }

    /// Consecutive failed receives since the last good frame
    pub fn consecutive_failures(&self) -> u8 {
        self.failures
    }

    /// Hunt for a header on the next receive
    ///
    /// For callers that know alignment is gone, e.g. after resetting the
    /// transmitting device or flushing an overrun receiver.
    pub fn force_resync(&mut self) {
        self.state = LinkState::Resyncing;
    }

    /// Give the channel back
    pub fn release(self) -> C {
        self.codec.release()
    }

    /// Receive the next frame
    pub fn receive(&mut self) -> Result<Frame, ReceiveError<C::Error>> {
        let result = match self.state {
            LinkState::Synced => self.codec.decode().map_err(ReceiveError::from),
            LinkState::Resyncing => self.resync(),
        };
        self.record(&result);
        result
    }

    fn resync(&mut self) -> Result<Frame, ReceiveError<C::Error>> {
        self.stats.resync_attempts = self.stats.resync_attempts.saturating_add(1);
        let channel = self.codec.channel();

        // One spare byte for a header split across the window boundary
        let mut window = [0u8; FRAME_LEN + 1];
        let mut filled = FRAME_LEN;
        channel
            .receive(&mut window[..filled])
            .map_err(ReceiveError::Channel)?;

        let mut offset = find_header(&window[..filled]);
        if offset.is_none() && window[filled - 1] == HEADER_BYTES[0] {
            channel
                .receive(&mut window[filled..])
                .map_err(ReceiveError::Channel)?;
            filled += 1;
            offset = find_header(&window[..filled]);
        }
        let offset = offset.ok_or(ReceiveError::NoSync)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("header found at window offset {=usize}", offset);

        let aligned = &window[offset..filled];
        let have = aligned.len().min(FRAME_LEN);
        let mut bytes = [0u8; FRAME_LEN];
        bytes[..have].copy_from_slice(&aligned[..have]);
        if have < FRAME_LEN {
            channel
                .receive(&mut bytes[have..])
                .map_err(ReceiveError::Channel)?;
        }

        FrameCodec::<C>::validate(&bytes).map_err(ReceiveError::from)
    }

    fn record(&mut self, result: &Result<Frame, ReceiveError<C::Error>>) {
        match result {
            Ok(_) => {
                self.stats.frames = self.stats.frames.saturating_add(1);
                self.failures = 0;
                if self.state == LinkState::Resyncing {
                    #[cfg(feature = "defmt")]
                    defmt::info!("link resynchronized");
                    self.state = LinkState::Synced;
                }
            }
            Err(e) => {
                let counter = match e {
                    ReceiveError::Channel(_) => &mut self.stats.channel_errors,
                    ReceiveError::Malformed { .. } | ReceiveError::Incomplete => {
                        &mut self.stats.malformed
                    }
                    ReceiveError::NoSync => &mut self.stats.sync_misses,
                };
                *counter = counter.saturating_add(1);
                self.failures = self.failures.saturating_add(1);
                if self.state == LinkState::Synced && self.failures >= self.resync_threshold {
                    #[cfg(feature = "defmt")]
                    defmt::warn!(
                        "{=u8} consecutive receive failures, resynchronizing",
                        self.failures
                    );
                    self.state = LinkState::Resyncing;
                }
            }
        }
    }
}
