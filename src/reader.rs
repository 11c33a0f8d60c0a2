use std::io::Read;

use bytes::Bytes;

use crate::error::Result;
use crate::framer::Framer;

/// Reads complete frames from any `Read` stream.
///
/// Binds a [`Framer`] to a stream so callers don't thread the
/// configuration through every call. Reads are exact: each frame
/// consumes precisely the length field plus the declared payload,
/// nothing is buffered ahead.
pub struct FrameReader<T> {
    inner: T,
    framer: Framer,
}

impl<T: Read> FrameReader<T> {
    /// Create a frame reader using the given framing convention.
    pub fn new(inner: T, framer: Framer) -> Self {
        Self { inner, framer }
    }

    /// Read the next complete frame (blocking).
    pub fn read_frame(&mut self) -> Result<Bytes> {
        let payload = self.framer.read_from(&mut self.inner)?;
        tracing::trace!(len = payload.len(), "frame read");
        Ok(payload)
    }

    /// The framing convention in use.
    pub fn framer(&self) -> Framer {
        self.framer
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
