/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The declared or actual payload length exceeds the configured maximum.
    #[error("frame too large ({size} bytes, max {max})")]
    FrameTooLarge { size: u64, max: u64 },

    /// The stream ended before a complete frame was transferred.
    #[error("stream ended before a complete frame")]
    IncompleteFrame,

    /// The requested length-field width is not one of 1, 2, or 4 bytes.
    #[error("unsupported length-field width: {0} bytes (expected 1, 2, or 4)")]
    InvalidFieldWidth(usize),

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FrameError>;
