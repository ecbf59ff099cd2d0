use bufprims_buffer::BufferError;

use crate::element::TypeCode;

/// Errors that can occur while building, packing or unpacking typed arrays.
#[derive(Debug, thiserror::Error)]
pub enum ArrayError {
    /// An element index is outside the array.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A value does not fit the element type's width or signedness.
    #[error("value {value} out of range for {type_code}")]
    ValueOutOfRange { value: i128, type_code: TypeCode },

    /// The byte length is not a whole number of elements.
    #[error("{len} bytes is not a multiple of the {width}-byte element width")]
    Alignment { len: usize, width: usize },

    /// A type code string was not recognised.
    #[error("unknown type code {0:?}")]
    InvalidTypeCode(String),

    /// A byte order string was not recognised.
    #[error("unknown byte order {0:?} (expected little, big or native)")]
    InvalidEndian(String),

    /// A textual value is not a number of the requested type.
    #[error("cannot parse {input:?} as {type_code}")]
    InvalidNumber { input: String, type_code: TypeCode },

    /// The underlying buffer or view could not be read.
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

pub type Result<T> = std::result::Result<T, ArrayError>;
