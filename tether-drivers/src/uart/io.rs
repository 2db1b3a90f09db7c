//! `embedded-io` byte channel adapter

use embedded_io::{Read, ReadExactError, Write};
use tether_hal::ByteChannel;

/// Errors from an [`IoChannel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoChannelError<E> {
    /// The reader hit end of stream before the buffer was full
    UnexpectedEof,
    /// The underlying reader or writer failed
    Io(E),
    /// Zero-length send or receive
    InvalidArgument,
}

/// Byte channel over a blocking `embedded-io` reader/writer
pub struct IoChannel<T> {
    io: T,
}

impl<T> IoChannel<T> {
    /// Wrap a blocking reader/writer
    pub fn new(io: T) -> Self {
        Self { io }
    }

    /// Give the reader/writer back
    pub fn release(self) -> T {
        self.io
    }
}

impl<T: Read + Write> ByteChannel for IoChannel<T> {
    type Error = IoChannelError<T::Error>;

    fn send(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if data.is_empty() {
            return Err(IoChannelError::InvalidArgument);
        }
        self.io.write_all(data).map_err(IoChannelError::Io)?;
        self.io.flush().map_err(IoChannelError::Io)
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        if buf.is_empty() {
            return Err(IoChannelError::InvalidArgument);
        }
        self.io.read_exact(buf).map_err(|e| match e {
            ReadExactError::UnexpectedEof => IoChannelError::UnexpectedEof,
            ReadExactError::Other(e) => IoChannelError::Io(e),
        })
    }
}
