use std::io::{ErrorKind, Write};

use crate::error::{FrameError, Result};
use crate::framer::Framer;

/// Writes complete frames to any `Write` stream.
///
/// Binds a [`Framer`] to a stream and flushes after every frame.
pub struct FrameWriter<T> {
    inner: T,
    framer: Framer,
}

impl<T: Write> FrameWriter<T> {
    /// Create a frame writer using the given framing convention.
    pub fn new(inner: T, framer: Framer) -> Self {
        Self { inner, framer }
    }

    /// Frame and send a payload (blocking), then flush.
    ///
    /// Returns the total bytes written (length field + payload).
    pub fn send(&mut self, payload: &[u8]) -> Result<usize> {
        let written = self.framer.write_to(&mut self.inner, payload)?;
        self.flush()?;
        tracing::trace!(len = payload.len(), "frame written");
        Ok(written)
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
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

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn write_single_frame() {
        let mut writer = FrameWriter::new(Vec::new(), Framer::U8_BE);

        let written = writer.send(b"hello").unwrap();
        assert_eq!(written, 6);

        let wire = writer.into_inner();
        assert_eq!(wire, [0x05, b'h', b'e', b'l', b'l', b'o']);
    }

    #[test]
    fn write_multiple_frames() {
        let mut writer = FrameWriter::new(Vec::new(), Framer::U16_LE);

        writer.send(b"one").unwrap();
        writer.send(b"two").unwrap();

        let framer = writer.framer();
        let mut stream = Cursor::new(writer.into_inner());
        assert_eq!(framer.read_from(&mut stream).unwrap().as_ref(), b"one");
        assert_eq!(framer.read_from(&mut stream).unwrap().as_ref(), b"two");
    }

    #[test]
    fn payload_too_large_rejected() {
        let mut writer = FrameWriter::new(Vec::new(), Framer::U8_LE);

        let err = writer.send(&vec![0u8; 300]).unwrap_err();
        assert!(matches!(err, FrameError::FrameTooLarge { .. }));
        assert!(writer.into_inner().is_empty());
    }

    #[test]
    fn flush_propagates() {
        #[derive(Default)]
        struct FlushTrackingWriter {
            flushed: Arc<AtomicBool>,
        }

        impl Write for FlushTrackingWriter {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                self.flushed.store(true, Ordering::SeqCst);
                Ok(())
            }
        }

        let sink = FlushTrackingWriter::default();
        let flag = Arc::clone(&sink.flushed);
        let mut writer = FrameWriter::new(sink, Framer::U8_BE);

        writer.send(b"x").unwrap();
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn interrupted_flush_retries() {
        struct InterruptedFlush {
            flush_interrupted: bool,
            data: Vec<u8>,
        }

        impl Write for InterruptedFlush {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.data.extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                if !self.flush_interrupted {
                    self.flush_interrupted = true;
                    return Err(std::io::Error::from(ErrorKind::Interrupted));
                }
                Ok(())
            }
        }

        let mut writer = FrameWriter::new(
            InterruptedFlush {
                flush_interrupted: false,
                data: Vec::new(),
            },
            Framer::U16_BE,
        );
        writer.send(b"retry").unwrap();
        assert!(!writer.into_inner().data.is_empty());
    }

    #[test]
    fn connection_closed_when_write_returns_zero() {
        struct ZeroWriter;

        impl Write for ZeroWriter {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Ok(0)
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut writer = FrameWriter::new(ZeroWriter, Framer::U8_BE);
        let err = writer.send(b"x").unwrap_err();
        assert!(matches!(err, FrameError::IncompleteFrame));
    }

    #[test]
    fn accessors_and_into_inner() {
        let mut writer = FrameWriter::new(Vec::<u8>::new(), Framer::U32_BE);

        assert_eq!(writer.framer(), Framer::U32_BE);
        let _ = writer.get_ref();
        let _ = writer.get_mut();
        let _inner = writer.into_inner();
    }

    #[test]
    #[cfg(unix)]
    fn concurrent_reader_writer_threads() {
        let (left, right) = std::os::unix::net::UnixStream::pair().unwrap();
        let mut writer = FrameWriter::new(left, Framer::U16_LE);
        let mut reader = crate::reader::FrameReader::new(right, Framer::U16_LE);

        let reader_thread = std::thread::spawn(move || {
            for expected in 0..64u16 {
                let payload = reader.read_frame().unwrap();
                assert_eq!(payload.as_ref(), format!("msg-{expected}").as_bytes());
            }
        });

        for i in 0..64u16 {
            let payload = format!("msg-{i}");
            writer.send(payload.as_bytes()).unwrap();
        }

        reader_thread.join().unwrap();
    }
}
