use bufprims_buffer::BufferError;

/// Errors that can occur during packet encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum PacketError {
    /// The input ends before a complete header (or checksum) is present.
    #[error("packet too short ({actual} bytes, need at least {needed})")]
    TooShort { needed: usize, actual: usize },

    /// The trailing checksum byte does not match the packet contents.
    #[error("checksum mismatch (expected 0x{expected:02x}, found 0x{actual:02x})")]
    ChecksumMismatch { expected: u8, actual: u8 },

    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// A field value or buffer access was rejected.
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

pub type Result<T> = std::result::Result<T, PacketError>;
