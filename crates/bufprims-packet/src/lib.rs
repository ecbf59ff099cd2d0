//! Packet construction and parsing on top of bufprims buffers.
//!
//! A packet is a fixed two-byte header followed by a payload and, optionally,
//! a trailing one-byte additive checksum:
//! - 1 byte protocol version
//! - 1 byte flags
//! - N payload bytes
//! - 1 byte checksum (sum of every preceding byte, modulo 256)
//!
//! Every operation is a pure function of its input; nothing here keeps state
//! between calls.

pub mod checksum;
pub mod codec;
pub mod error;

pub use checksum::{append_checksum, checksum, verify_checksum};
pub use codec::{
    build_header, build_message, decode_packet, parse_header, validate_packet, Header, Packet,
    PacketConfig, PacketView, CHECKSUM_SIZE, DEFAULT_MAX_PAYLOAD, HEADER_SIZE,
};
pub use error::{PacketError, Result};
