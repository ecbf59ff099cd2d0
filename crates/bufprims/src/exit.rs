use std::fmt;
use std::io;

use bufprims_array::ArrayError;
use bufprims_buffer::BufferError;
use bufprims_packet::PacketError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => FAILURE,
        io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => DATA_INVALID,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn buffer_error(context: &str, err: BufferError) -> CliError {
    match err {
        BufferError::Io(source) => io_error(context, source),
        BufferError::InvalidHex(_) | BufferError::ValueOutOfRange { .. } => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        BufferError::LimitExceeded { .. } | BufferError::Decode { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

pub fn array_error(context: &str, err: ArrayError) -> CliError {
    match err {
        ArrayError::Buffer(err) => buffer_error(context, err),
        ArrayError::Alignment { .. } => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        ArrayError::ValueOutOfRange { .. }
        | ArrayError::InvalidNumber { .. }
        | ArrayError::InvalidTypeCode(_)
        | ArrayError::InvalidEndian(_) => CliError::new(USAGE, format!("{context}: {err}")),
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

pub fn packet_error(context: &str, err: PacketError) -> CliError {
    match err {
        PacketError::Buffer(err) => buffer_error(context, err),
        PacketError::TooShort { .. }
        | PacketError::ChecksumMismatch { .. }
        | PacketError::PayloadTooLarge { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}
