/// Errors that can occur while accessing or mutating byte buffers.
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    /// An index is outside the valid bounds of the buffer or view.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A slice or view range is inverted or extends past the end.
    #[error("invalid range {start}..{end} for length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// An integer does not fit in a single unsigned byte.
    #[error("value {value} out of byte range (0-255)")]
    ValueOutOfRange { value: i64 },

    /// The buffer shrank underneath a view since the view was created.
    #[error("view {start}..{end} exceeds current buffer length {len}")]
    StaleView { start: usize, end: usize, len: usize },

    /// A byte region is not valid UTF-8.
    #[error("invalid utf-8 after {valid_up_to} bytes")]
    Decode {
        valid_up_to: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    /// A hex string could not be decoded.
    #[error("invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// A read produced more bytes than the caller allowed.
    #[error("input exceeds limit of {limit} bytes")]
    LimitExceeded { limit: usize },

    /// An I/O error occurred while filling or draining a buffer.
    #[error("buffer I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<std::str::Utf8Error> for BufferError {
    fn from(source: std::str::Utf8Error) -> Self {
        Self::Decode {
            valid_up_to: source.valid_up_to(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BufferError>;

/// Validate a half-open range `start..end` against a length.
pub(crate) fn check_range(start: usize, end: usize, len: usize) -> Result<()> {
    if start > end || end > len {
        return Err(BufferError::InvalidRange { start, end, len });
    }
    Ok(())
}
