use bufprims_buffer::{checked_byte, BufferView, ByteBuffer};
use bytes::Bytes;
use tracing::trace;

use crate::checksum::{checksum, verify_checksum};
use crate::error::{PacketError, Result};

/// Packet header: version (1) + flags (1) = 2 bytes.
pub const HEADER_SIZE: usize = 2;

/// Trailing checksum: 1 byte.
pub const CHECKSUM_SIZE: usize = 1;

/// Default maximum payload size: 64 KiB.
pub const DEFAULT_MAX_PAYLOAD: usize = 64 * 1024;

/// The fixed two-byte packet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Header {
    pub version: u8,
    pub flags: u8,
}

impl Header {
    pub fn new(version: u8, flags: u8) -> Self {
        Self { version, flags }
    }

    /// Build a header from wider integers, rejecting values outside 0-255.
    pub fn try_from_ints(version: i64, flags: i64) -> Result<Self> {
        Ok(Self {
            version: checked_byte(version)?,
            flags: checked_byte(flags)?,
        })
    }

    /// True if every bit in `mask` is set.
    pub fn has_flags(&self, mask: u8) -> bool {
        self.flags & mask == mask
    }

    pub fn to_bytes(self) -> [u8; HEADER_SIZE] {
        [self.version, self.flags]
    }
}

impl From<Header> for (u8, u8) {
    fn from(header: Header) -> Self {
        (header.version, header.flags)
    }
}

/// Configuration for the packet codec.
#[derive(Debug, Clone)]
pub struct PacketConfig {
    /// Append a checksum when encoding and require one when decoding. Default: true.
    pub checksum: bool,
    /// Maximum payload size in bytes. Default: 64 KiB.
    pub max_payload_size: usize,
}

impl Default for PacketConfig {
    fn default() -> Self {
        Self {
            checksum: true,
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}

impl PacketConfig {
    /// Bytes of framing around the payload under this configuration.
    pub fn overhead(&self) -> usize {
        HEADER_SIZE + if self.checksum { CHECKSUM_SIZE } else { 0 }
    }
}

/// An owned packet: header plus payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub header: Header,
    pub payload: Bytes,
}

impl Packet {
    pub fn new(header: Header, payload: impl Into<Bytes>) -> Self {
        Self {
            header,
            payload: payload.into(),
        }
    }

    /// The total wire size of this packet under `config`.
    pub fn wire_size(&self, config: &PacketConfig) -> usize {
        config.overhead() + self.payload.len()
    }

    /// Encode into the wire format.
    ///
    /// Wire format:
    /// ```text
    /// ┌──────────┬──────────┬─────────────────┬──────────────┐
    /// │ Version  │ Flags    │ Payload         │ Checksum     │
    /// │ (1B)     │ (1B)     │ (N bytes)       │ (1B, opt.)   │
    /// └──────────┴──────────┴─────────────────┴──────────────┘
    /// ```
    pub fn encode(&self, config: &PacketConfig) -> Result<ByteBuffer> {
        if self.payload.len() > config.max_payload_size {
            return Err(PacketError::PayloadTooLarge {
                size: self.payload.len(),
                max: config.max_payload_size,
            });
        }

        let mut out = ByteBuffer::with_capacity(self.wire_size(config));
        out.extend_from_slice(&self.header.to_bytes());
        out.extend_from_slice(&self.payload);
        if config.checksum {
            let sum = checksum(&out);
            out.append(sum);
        }
        Ok(out)
    }
}

/// A decoded packet borrowing its payload from the source buffer.
#[derive(Debug, Clone, Copy)]
pub struct PacketView<'a> {
    pub header: Header,
    pub payload: BufferView<'a>,
    /// The verified checksum byte, if the configuration requires one.
    pub checksum: Option<u8>,
}

impl PacketView<'_> {
    /// Copy the payload out into an owned [`Packet`].
    pub fn to_packet(&self) -> Result<Packet> {
        let payload = Bytes::copy_from_slice(self.payload.as_slice()?);
        Ok(Packet::new(self.header, payload))
    }
}

/// Build the two-byte header `[version, flags]`.
pub fn build_header(version: u8, flags: u8) -> ByteBuffer {
    ByteBuffer::from(Header::new(version, flags).to_bytes())
}

/// Build `[command] + payload`. The payload bytes are copied unchanged.
pub fn build_message(command: u8, payload: &[u8]) -> ByteBuffer {
    let mut out = ByteBuffer::with_capacity(1 + payload.len());
    out.append(command);
    out.extend_from_slice(payload);
    out
}

/// True if `data` is non-empty and starts with `expected_first_byte`.
pub fn validate_packet(data: &[u8], expected_first_byte: u8) -> bool {
    data.first() == Some(&expected_first_byte)
}

/// Read the version and flags from the first two bytes of `buffer`.
pub fn parse_header(buffer: &ByteBuffer) -> Result<Header> {
    if buffer.len() < HEADER_SIZE {
        return Err(PacketError::TooShort {
            needed: HEADER_SIZE,
            actual: buffer.len(),
        });
    }
    let view = buffer.view(0, HEADER_SIZE)?;
    Ok(Header::new(view.get(0)?, view.get(1)?))
}

/// Decode a complete packet, verifying its checksum when `config` requires one.
///
/// The returned payload is a view into `buffer`; nothing is copied.
pub fn decode_packet<'a>(buffer: &'a ByteBuffer, config: &PacketConfig) -> Result<PacketView<'a>> {
    let needed = config.overhead();
    if buffer.len() < needed {
        return Err(PacketError::TooShort {
            needed,
            actual: buffer.len(),
        });
    }

    let header = parse_header(buffer)?;
    let payload_end = if config.checksum {
        buffer.len() - CHECKSUM_SIZE
    } else {
        buffer.len()
    };

    let payload_len = payload_end - HEADER_SIZE;
    if payload_len > config.max_payload_size {
        return Err(PacketError::PayloadTooLarge {
            size: payload_len,
            max: config.max_payload_size,
        });
    }

    let checksum = if config.checksum {
        verify_checksum(buffer)?;
        Some(buffer.get(payload_end)?)
    } else {
        None
    };

    trace!(
        version = header.version,
        flags = header.flags,
        payload_len,
        "decoded packet"
    );

    Ok(PacketView {
        header,
        payload: buffer.view(HEADER_SIZE, payload_end)?,
        checksum,
    })
}

#[cfg(test)]
mod tests {
    use bufprims_array::{Endian, TypedArray};
    use bufprims_buffer::BufferError;
    use hex_literal::hex;

    use super::*;

    #[test]
    fn header_is_version_then_flags() {
        assert_eq!(build_header(1, 0), [0x01, 0x00]);
        assert_eq!(build_header(0xFE, 0x81), [0xFE, 0x81]);
    }

    #[test]
    fn header_rejects_wide_values() {
        assert_eq!(Header::try_from_ints(2, 255).unwrap(), Header::new(2, 255));
        assert!(matches!(
            Header::try_from_ints(256, 0),
            Err(PacketError::Buffer(BufferError::ValueOutOfRange { value: 256 }))
        ));
        assert!(Header::try_from_ints(0, -1).is_err());
    }

    #[test]
    fn message_prefixes_command() {
        let payload = ByteBuffer::from(hex!("aa bb cc"));
        let msg = build_message(0x10, &payload);
        assert_eq!(msg, hex!("10 aa bb cc"));
        assert_eq!(payload, hex!("aa bb cc"));
        assert_eq!(build_message(0x01, &[]), [0x01]);
    }

    #[test]
    fn validate_checks_first_byte() {
        assert!(validate_packet(&[0xAA, 0x10], 0xAA));
        assert!(!validate_packet(&[0x01], 0xAA));
        assert!(!validate_packet(&[], 0xAA));
    }

    #[test]
    fn parse_header_reads_two_bytes() {
        let buf = ByteBuffer::from(hex!("03 80 ff"));
        let header = parse_header(&buf).unwrap();
        assert_eq!(<(u8, u8)>::from(header), (3, 0x80));
        assert!(header.has_flags(0x80));
        assert!(!header.has_flags(0x81));

        let short = ByteBuffer::from([0x01]);
        assert!(matches!(
            parse_header(&short),
            Err(PacketError::TooShort { needed: 2, actual: 1 })
        ));
        assert!(matches!(
            parse_header(&ByteBuffer::new()),
            Err(PacketError::TooShort { needed: 2, actual: 0 })
        ));
    }

    #[test]
    fn encode_decode_roundtrip() {
        let config = PacketConfig::default();
        let packet = Packet::new(Header::new(1, 0x02), Bytes::from_static(b"ping"));

        let wire = packet.encode(&config).unwrap();
        assert_eq!(wire.len(), packet.wire_size(&config));
        assert_eq!(wire.get(wire.len() - 1).unwrap(), checksum(&wire[..wire.len() - 1]));

        let view = decode_packet(&wire, &config).unwrap();
        assert_eq!(view.header, packet.header);
        assert_eq!(view.payload.as_slice().unwrap(), b"ping");
        assert_eq!(view.checksum, Some(wire[wire.len() - 1]));
        assert_eq!(view.to_packet().unwrap(), packet);
    }

    #[test]
    fn decode_without_checksum() {
        let config = PacketConfig {
            checksum: false,
            ..PacketConfig::default()
        };
        let wire = ByteBuffer::from(hex!("01 00 68 69"));
        let view = decode_packet(&wire, &config).unwrap();
        assert_eq!(view.payload.decode_utf8().unwrap(), "hi");
        assert_eq!(view.checksum, None);

        let header_only = build_header(1, 0);
        assert!(decode_packet(&header_only, &config)
            .unwrap()
            .payload
            .is_empty());
    }

    #[test]
    fn decode_detects_corruption() {
        let config = PacketConfig::default();
        let mut wire = Packet::new(Header::new(1, 0), vec![1u8, 2, 3])
            .encode(&config)
            .unwrap();
        wire.set(3, 0x7F).unwrap();
        assert!(matches!(
            decode_packet(&wire, &config),
            Err(PacketError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn decode_rejects_short_input() {
        let config = PacketConfig::default();
        let wire = build_header(1, 0);
        assert!(matches!(
            decode_packet(&wire, &config),
            Err(PacketError::TooShort { needed: 3, actual: 2 })
        ));
    }

    #[test]
    fn payload_limit_is_enforced_both_ways() {
        let config = PacketConfig {
            checksum: true,
            max_payload_size: 4,
        };
        let packet = Packet::new(Header::default(), vec![0u8; 5]);
        assert!(matches!(
            packet.encode(&config),
            Err(PacketError::PayloadTooLarge { size: 5, max: 4 })
        ));

        let oversized = append_wire(&[0, 0, 1, 2, 3, 4, 5]);
        assert!(matches!(
            decode_packet(&oversized, &config),
            Err(PacketError::PayloadTooLarge { size: 5, max: 4 })
        ));
    }

    #[test]
    fn typed_payload_survives_packet() {
        let values = TypedArray::<u16>::from_slice(&[0x0102, 0xFFFF]);
        let packet = Packet::new(Header::new(2, 0), values.to_bytes(Endian::Big).freeze());
        let wire = packet.encode(&PacketConfig::default()).unwrap();

        let view = decode_packet(&wire, &PacketConfig::default()).unwrap();
        let back = TypedArray::<u16>::from_view(Endian::Big, &view.payload).unwrap();
        assert_eq!(back, values);
    }

    fn append_wire(body: &[u8]) -> ByteBuffer {
        crate::checksum::append_checksum(body)
    }
}
