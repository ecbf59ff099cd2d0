//! Byte buffers, zero-copy views, typed arrays and packet checksums.
//!
//! # Crate Structure
//!
//! - [`buffer`] — Owned byte buffers and bounds-checked views
//! - [`array`] — Typed numeric arrays with explicit byte order (behind `array` feature)
//! - [`packet`] — Packet headers, messages and checksums (behind `packet` feature)

/// Re-export buffer types.
pub mod buffer {
    pub use bufprims_buffer::*;
}

/// Re-export typed array types (requires `array` feature).
#[cfg(feature = "array")]
pub mod array {
    pub use bufprims_array::*;
}

/// Re-export packet types (requires `packet` feature).
#[cfg(feature = "packet")]
pub mod packet {
    pub use bufprims_packet::*;
}
