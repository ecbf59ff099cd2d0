//! Owned byte buffers and zero-copy views over them.
//!
//! This is the lowest layer of bufprims. Everything else builds on the two
//! types provided here:
//! - [`ByteBuffer`]: an owned, growable sequence of bytes
//! - [`BufferView`] / [`BufferViewMut`]: non-owning windows into a buffer
//!
//! Views borrow the buffer they were taken from and re-check their bounds
//! against the buffer's current length on every access.

pub mod buffer;
pub mod error;
pub mod io;
pub mod view;

pub use buffer::{checked_byte, ByteBuffer};
pub use error::{BufferError, Result};
pub use io::{read_into, write_all_from};
pub use view::{BufferView, BufferViewMut};
