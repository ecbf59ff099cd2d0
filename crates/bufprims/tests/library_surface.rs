#![cfg(all(feature = "array", feature = "packet"))]

use bufprims::array::{Endian, TypedArray};
use bufprims::buffer::{BufferError, ByteBuffer};
use bufprims::packet::{
    append_checksum, build_header, build_message, checksum, decode_packet, parse_header,
    validate_packet, Header, Packet, PacketConfig,
};

#[test]
fn header_and_checksum_scenarios() {
    assert_eq!(build_header(1, 0), [1, 0]);
    assert_eq!(checksum(&[1, 2, 3]), 6);
    assert_eq!(checksum(&[0xFF, 0xFF]), 254);
    assert!(validate_packet(&[0xAA, 0x10], 0xAA));
    assert!(!validate_packet(&[0x01], 0xAA));
}

#[test]
fn typed_payload_in_a_checked_message() {
    let values = TypedArray::<u32>::from_slice(&[1, 2, 3]);
    let payload = values.to_bytes(Endian::NETWORK);
    assert_eq!(payload.len(), 12);

    let message = append_checksum(&build_message(0x10, &payload));
    assert_eq!(message.len(), 1 + 12 + 1);
    assert_eq!(message.get(0).unwrap(), 0x10);

    let body = message.view(1, 13).unwrap();
    let back = TypedArray::<u32>::from_view(Endian::NETWORK, &body).unwrap();
    assert_eq!(back, values);

    let misaligned = message.view(1, 14).unwrap();
    assert!(TypedArray::<u32>::from_view(Endian::NETWORK, &misaligned).is_err());
}

#[test]
fn view_writes_are_visible_to_packet_parsing() {
    let mut wire = ByteBuffer::zeroed(4);
    {
        let mut head = wire.view_mut(0, 2).unwrap();
        head.set(0, 7).unwrap();
        head.set_int(1, 0x81).unwrap();
        assert!(matches!(
            head.set_int(1, 256),
            Err(BufferError::ValueOutOfRange { value: 256 })
        ));
    }
    let header = parse_header(&wire).unwrap();
    assert_eq!(header, Header::new(7, 0x81));
}

#[test]
fn packet_round_trip_through_facade() {
    let config = PacketConfig::default();
    let packet = Packet::new(Header::new(3, 0), ByteBuffer::from_text("hello").freeze());
    let wire = packet.encode(&config).unwrap();

    let view = decode_packet(&wire, &config).unwrap();
    assert_eq!(view.payload.decode_utf8().unwrap(), "hello");
    assert_eq!(view.to_packet().unwrap(), packet);
}
