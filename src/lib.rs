//! Length-prefixed message framing for byte streams.
//!
//! Delimits discrete messages on top of a raw streaming transport (TCP,
//! Unix sockets, pipes) that has no message boundaries of its own. Every
//! frame is a length field followed by exactly that many payload bytes:
//!
//! ```text
//! ┌────────────────────┬────────────────────────┐
//! │ Length (1/2/4 B)   │ Payload (Length bytes) │
//! └────────────────────┴────────────────────────┘
//! ```
//!
//! Field width and byte order are fixed per [`Framer`], never negotiated
//! or embedded in the frame. Six ready-made conventions are provided,
//! e.g. [`Framer::U32_BE`] for the common 4-byte big-endian prefix:
//!
//! ```
//! use lenframe::Framer;
//!
//! let mut wire = Vec::new();
//! Framer::U8_BE.write_to(&mut wire, b"hello")?;
//! assert_eq!(wire, [0x05, b'h', b'e', b'l', b'l', b'o']);
//!
//! let payload = Framer::U8_BE.read_from(&mut std::io::Cursor::new(wire))?;
//! assert_eq!(payload.as_ref(), b"hello");
//! # Ok::<(), lenframe::FrameError>(())
//! ```
//!
//! The framer is a pure codec: no connection management, no retries, no
//! recovery. Every failure is returned to the caller as a distinct
//! [`FrameError`] kind.

pub mod codec;
pub mod error;
pub mod framer;
pub mod reader;
pub mod writer;

pub use codec::{read_frame, write_frame, ByteOrder, FieldWidth};
pub use error::{FrameError, Result};
pub use framer::Framer;
pub use reader::FrameReader;
pub use writer::FrameWriter;
