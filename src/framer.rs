use std::io::{Read, Write};

use bytes::Bytes;

use crate::codec::{read_frame_bounded, write_frame_bounded, ByteOrder, FieldWidth};
use crate::error::Result;

/// A fixed length-prefix convention: field width, byte order, and the
/// resulting payload bound.
///
/// A `Framer` holds no per-call state, so one value can serve any number
/// of streams. Concurrent calls against the *same* stream must be
/// serialized by the caller; the framer performs no locking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Framer {
    width: FieldWidth,
    order: ByteOrder,
    max_payload: u64,
}

impl Framer {
    /// 1-byte length field, little-endian (payloads 0–255).
    pub const U8_LE: Framer = Framer::new(FieldWidth::U8, ByteOrder::Little);
    /// 1-byte length field, big-endian (payloads 0–255).
    pub const U8_BE: Framer = Framer::new(FieldWidth::U8, ByteOrder::Big);
    /// 2-byte length field, little-endian (payloads 0–65535).
    pub const U16_LE: Framer = Framer::new(FieldWidth::U16, ByteOrder::Little);
    /// 2-byte length field, big-endian (payloads 0–65535).
    pub const U16_BE: Framer = Framer::new(FieldWidth::U16, ByteOrder::Big);
    /// 4-byte length field, little-endian (payloads 0–4294967295).
    pub const U32_LE: Framer = Framer::new(FieldWidth::U32, ByteOrder::Little);
    /// 4-byte length field, big-endian (payloads 0–4294967295).
    pub const U32_BE: Framer = Framer::new(FieldWidth::U32, ByteOrder::Big);

    /// Create a framer for the given field width and byte order.
    ///
    /// The payload bound is the largest length the field can represent.
    pub const fn new(width: FieldWidth, order: ByteOrder) -> Self {
        Self {
            width,
            order,
            max_payload: width.max_payload(),
        }
    }

    /// Create a framer from a raw length-field byte count.
    ///
    /// Widths outside {1, 2, 4} are rejected with
    /// [`FrameError::InvalidFieldWidth`](crate::FrameError::InvalidFieldWidth).
    pub fn from_field_bytes(bytes: usize, order: ByteOrder) -> Result<Self> {
        Ok(Self::new(FieldWidth::from_bytes(bytes)?, order))
    }

    /// Cap the accepted payload length below the field-width limit.
    ///
    /// Bounds the allocation a decoded length field can force, e.g. a
    /// 4-byte field capped at 16 MiB. Values above the width limit are
    /// clamped to it, so an encoded length always fits the field.
    pub fn with_max_payload(self, max_payload: u64) -> Self {
        Self {
            max_payload: max_payload.min(self.width.max_payload()),
            ..self
        }
    }

    /// The configured length-field width.
    pub const fn field_width(&self) -> FieldWidth {
        self.width
    }

    /// The configured byte order.
    pub const fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// The largest payload length this framer will encode or accept.
    pub const fn max_payload(&self) -> u64 {
        self.max_payload
    }

    /// Read one frame from `reader` and return its payload.
    ///
    /// Consumes exactly `field width + declared length` bytes. A stream
    /// that ends before that yields
    /// [`FrameError::IncompleteFrame`](crate::FrameError::IncompleteFrame);
    /// a declared length over [`max_payload`](Self::max_payload) yields
    /// [`FrameError::FrameTooLarge`](crate::FrameError::FrameTooLarge)
    /// without the payload being read.
    pub fn read_from<R: Read>(&self, reader: &mut R) -> Result<Bytes> {
        read_frame_bounded(reader, self.width, self.order, self.max_payload)
    }

    /// Write `payload` as one frame to `writer`.
    ///
    /// Returns the total bytes written (length field + payload). An
    /// over-long payload fails with
    /// [`FrameError::FrameTooLarge`](crate::FrameError::FrameTooLarge)
    /// before anything is written.
    pub fn write_to<W: Write>(&self, writer: &mut W, payload: &[u8]) -> Result<usize> {
        write_frame_bounded(writer, payload, self.width, self.order, self.max_payload)
    }
}
