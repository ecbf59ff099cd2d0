//! Additive one-byte checksum.

use bufprims_buffer::ByteBuffer;
use tracing::debug;

use crate::error::{PacketError, Result};

/// Sum of all bytes, modulo 256.
///
/// Accepts anything that derefs to a byte slice, including [`ByteBuffer`] and
/// the slice behind a [`BufferView`](bufprims_buffer::BufferView).
#[must_use]
pub fn checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, byte| acc.wrapping_add(*byte))
}

/// Return a new buffer holding `data` followed by its checksum.
///
/// The input is left untouched.
#[must_use]
pub fn append_checksum(data: &[u8]) -> ByteBuffer {
    let mut out = ByteBuffer::with_capacity(data.len() + 1);
    out.extend_from_slice(data);
    out.append(checksum(data));
    out
}

/// Check a buffer whose final byte is the checksum of everything before it.
pub fn verify_checksum(data: &[u8]) -> Result<()> {
    let Some((&actual, body)) = data.split_last() else {
        return Err(PacketError::TooShort {
            needed: 1,
            actual: 0,
        });
    };
    let expected = checksum(body);
    if expected != actual {
        debug!(expected, actual, len = data.len(), "checksum mismatch");
        return Err(PacketError::ChecksumMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn sums_modulo_256() {
        assert_eq!(checksum(&[0x01, 0x02, 0x03]), 6);
        assert_eq!(checksum(&[0xFF, 0xFF]), 254);
        assert_eq!(checksum(&[]), 0);
        assert_eq!(checksum(&[0x80; 4]), 0);
    }

    #[test]
    fn checksum_is_stable() {
        let buf = ByteBuffer::from(hex!("de ad be ef"));
        assert_eq!(checksum(&buf), checksum(&buf));
    }

    #[test]
    fn checksum_of_view() {
        let buf = ByteBuffer::from(hex!("ff 01 02 03 ff"));
        let view = buf.view(1, 4).unwrap();
        assert_eq!(checksum(view.as_slice().unwrap()), 6);
    }

    #[test]
    fn append_checksum_returns_new_buffer() {
        let original = ByteBuffer::from([0x01, 0x02, 0x03]);
        let before = original.clone();

        let with_sum = append_checksum(&original);
        assert_eq!(with_sum, [0x01, 0x02, 0x03, 0x06]);
        assert_eq!(original, before);
    }

    #[test]
    fn verify_accepts_and_rejects() {
        let good = append_checksum(&hex!("01 00 aa bb"));
        verify_checksum(&good).unwrap();

        let mut bad = good.clone();
        bad.set(2, 0xAB).unwrap();
        assert!(matches!(
            verify_checksum(&bad),
            Err(PacketError::ChecksumMismatch { .. })
        ));

        assert!(matches!(
            verify_checksum(&[]),
            Err(PacketError::TooShort { needed: 1, actual: 0 })
        ));
        // A lone zero byte is the checksum of nothing.
        verify_checksum(&[0]).unwrap();
    }
}
