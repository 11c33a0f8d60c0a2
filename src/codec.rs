use std::io::{ErrorKind, Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Number of bytes used to encode the payload length on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldWidth {
    /// 1-byte length field (payloads up to 255 bytes).
    U8,
    /// 2-byte length field (payloads up to 65535 bytes).
    U16,
    /// 4-byte length field (payloads up to 4294967295 bytes).
    U32,
}

impl FieldWidth {
    /// The width of the length field in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            FieldWidth::U8 => 1,
            FieldWidth::U16 => 2,
            FieldWidth::U32 => 4,
        }
    }

    /// The largest payload length representable in this field width.
    pub const fn max_payload(self) -> u64 {
        match self {
            FieldWidth::U8 => u8::MAX as u64,
            FieldWidth::U16 => u16::MAX as u64,
            FieldWidth::U32 => u32::MAX as u64,
        }
    }

    /// Convert a raw byte count into a field width.
    ///
    /// Anything outside {1, 2, 4} is rejected with
    /// [`FrameError::InvalidFieldWidth`] rather than silently widened.
    pub fn from_bytes(bytes: usize) -> Result<Self> {
        match bytes {
            1 => Ok(FieldWidth::U8),
            2 => Ok(FieldWidth::U16),
            4 => Ok(FieldWidth::U32),
            other => Err(FrameError::InvalidFieldWidth(other)),
        }
    }
}

/// Byte order of the length field on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Least-significant byte first.
    Little,
    /// Most-significant byte first.
    Big,
}

/// Append a length field to `dst`.
///
/// `len` must already be validated against [`FieldWidth::max_payload`];
/// the narrowing casts here are lossless only under that precondition.
pub(crate) fn put_length(dst: &mut BytesMut, len: u64, width: FieldWidth, order: ByteOrder) {
    match (width, order) {
        (FieldWidth::U8, _) => dst.put_u8(len as u8),
        (FieldWidth::U16, ByteOrder::Little) => dst.put_u16_le(len as u16),
        (FieldWidth::U16, ByteOrder::Big) => dst.put_u16(len as u16),
        (FieldWidth::U32, ByteOrder::Little) => dst.put_u32_le(len as u32),
        (FieldWidth::U32, ByteOrder::Big) => dst.put_u32(len as u32),
    }
}

/// Interpret `buf` as a length field.
///
/// `buf` must hold exactly `width.bytes()` bytes.
pub(crate) fn get_length(buf: &[u8], width: FieldWidth, order: ByteOrder) -> u64 {
    match (width, order) {
        (FieldWidth::U8, _) => u64::from(buf[0]),
        (FieldWidth::U16, ByteOrder::Little) => u64::from(u16::from_le_bytes([buf[0], buf[1]])),
        (FieldWidth::U16, ByteOrder::Big) => u64::from(u16::from_be_bytes([buf[0], buf[1]])),
        (FieldWidth::U32, ByteOrder::Little) => {
            u64::from(u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]))
        }
        (FieldWidth::U32, ByteOrder::Big) => {
            u64::from(u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]))
        }
    }
}

/// Read one frame from `reader`.
///
/// Wire format:
/// ```text
/// ┌────────────────────────┬───────────────────────┐
/// │ Length (W bytes, O)    │ Payload (Length bytes)│
/// └────────────────────────┴───────────────────────┘
/// ```
/// The maximum accepted payload length is whatever the field width can
/// represent. Returns [`FrameError::IncompleteFrame`] if the stream ends
/// before a full frame is available.
pub fn read_frame<R: Read>(reader: &mut R, width: FieldWidth, order: ByteOrder) -> Result<Bytes> {
    read_frame_bounded(reader, width, order, width.max_payload())
}

/// Write `payload` as one frame to `writer`.
///
/// Returns the total number of bytes written (length field + payload).
/// If the payload does not fit the field width, fails with
/// [`FrameError::FrameTooLarge`] and writes nothing.
pub fn write_frame<W: Write>(
    writer: &mut W,
    payload: &[u8],
    width: FieldWidth,
    order: ByteOrder,
) -> Result<usize> {
    write_frame_bounded(writer, payload, width, order, width.max_payload())
}

pub(crate) fn read_frame_bounded<R: Read>(
    reader: &mut R,
    width: FieldWidth,
    order: ByteOrder,
    max_payload: u64,
) -> Result<Bytes> {
    let mut field = [0u8; 4];
    let field = &mut field[..width.bytes()];
    read_exact(reader, field)?;

    // Widen before comparing; the bounds check never depends on the
    // native usize width.
    let declared = get_length(field, width, order);
    if declared > max_payload {
        return Err(FrameError::FrameTooLarge {
            size: declared,
            max: max_payload,
        });
    }

    let mut payload = BytesMut::zeroed(declared as usize);
    read_exact(reader, &mut payload)?;
    Ok(payload.freeze())
}

pub(crate) fn write_frame_bounded<W: Write>(
    writer: &mut W,
    payload: &[u8],
    width: FieldWidth,
    order: ByteOrder,
    max_payload: u64,
) -> Result<usize> {
    let len = payload.len() as u64;
    if len > max_payload {
        return Err(FrameError::FrameTooLarge {
            size: len,
            max: max_payload,
        });
    }

    // One combined buffer so the length field and payload always reach
    // the stream as a single logical write.
    let mut buf = BytesMut::with_capacity(width.bytes() + payload.len());
    put_length(&mut buf, len, width, order);
    buf.put_slice(payload);

    let mut offset = 0usize;
    while offset < buf.len() {
        match writer.write(&buf[offset..]) {
            Ok(0) => return Err(FrameError::IncompleteFrame),
            Ok(n) => offset += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(FrameError::Io(err)),
        }
    }

    Ok(buf.len())
}

/// `read_exact` with short reads mapped to [`FrameError::IncompleteFrame`].
fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    match reader.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::UnexpectedEof => Err(FrameError::IncompleteFrame),
        Err(err) => Err(FrameError::Io(err)),
    }
}
