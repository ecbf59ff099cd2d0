//! Moving bytes between buffers and `std::io` streams.

use std::io::{self, ErrorKind, Read, Write};

use tracing::debug;

use crate::buffer::ByteBuffer;
use crate::error::{BufferError, Result};

const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Append everything `reader` yields to `buffer`, up to `limit` bytes.
///
/// Returns the number of bytes appended. Fails with
/// [`BufferError::LimitExceeded`] as soon as the stream produces more than
/// `limit` bytes; whatever was read before that point stays in `buffer`.
pub fn read_into<R: Read>(reader: &mut R, buffer: &mut ByteBuffer, limit: usize) -> Result<usize> {
    let mut total = 0usize;
    let mut chunk = [0u8; READ_CHUNK_SIZE];
    loop {
        let read = match reader.read(&mut chunk) {
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(BufferError::Io(err)),
        };

        if read == 0 {
            return Ok(total);
        }

        if total + read > limit {
            debug!(limit, "read limit exceeded");
            return Err(BufferError::LimitExceeded { limit });
        }

        buffer.extend_from_slice(&chunk[..read]);
        total += read;
    }
}

/// Write all of `bytes` to `writer` and flush it.
///
/// Only `Interrupted` is retried. Every other error, `WouldBlock` included,
/// is returned to the caller as [`BufferError::Io`].
pub fn write_all_from<W: Write>(writer: &mut W, bytes: &[u8]) -> Result<()> {
    let mut offset = 0usize;
    while offset < bytes.len() {
        match writer.write(&bytes[offset..]) {
            Ok(0) => return Err(BufferError::Io(ErrorKind::WriteZero.into())),
            Ok(n) => offset += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(BufferError::Io(err)),
        }
    }

    loop {
        match writer.flush() {
            Ok(()) => return Ok(()),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(BufferError::Io(err)),
        }
    }
}

impl Write for ByteBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos >= self.bytes.len() {
                return Ok(0);
            }
            if self.pos == 1 {
                self.pos += 1;
                return Err(io::Error::new(ErrorKind::Interrupted, "again"));
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct ZeroWriter;

    impl Write for ZeroWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn read_into_appends_stream() {
        let mut buf = ByteBuffer::from([0xFF]);
        let n = read_into(&mut Cursor::new(b"hello".to_vec()), &mut buf, 64).unwrap();
        assert_eq!(n, 5);
        assert_eq!(buf.as_slice(), b"\xffhello");
    }

    #[test]
    fn read_into_retries_interrupted_reads() {
        let mut reader = ByteByByteReader {
            bytes: vec![1, 2, 3, 4],
            pos: 0,
        };
        let mut buf = ByteBuffer::new();
        let n = read_into(&mut reader, &mut buf, 64).unwrap();
        // Position 1 is consumed by the interrupted call.
        assert_eq!(n, 3);
        assert_eq!(buf, [1, 3, 4]);
    }

    #[test]
    fn read_into_enforces_limit() {
        let mut buf = ByteBuffer::new();
        let err = read_into(&mut Cursor::new(vec![0u8; 32]), &mut buf, 16).unwrap_err();
        assert!(matches!(err, BufferError::LimitExceeded { limit: 16 }));
    }

    #[test]
    fn write_all_from_writes_everything() {
        let mut out = Cursor::new(Vec::new());
        write_all_from(&mut out, b"abc").unwrap();
        assert_eq!(out.into_inner(), b"abc".to_vec());
    }

    #[test]
    fn write_all_from_reports_stalled_writer() {
        let err = write_all_from(&mut ZeroWriter, b"abc").unwrap_err();
        match err {
            BufferError::Io(io) => assert_eq!(io.kind(), ErrorKind::WriteZero),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    struct WouldBlockWriter {
        calls: usize,
    }

    impl Write for WouldBlockWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            self.calls += 1;
            Err(io::Error::new(ErrorKind::WouldBlock, "not ready"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_all_from_returns_would_block() {
        let mut writer = WouldBlockWriter { calls: 0 };
        let err = write_all_from(&mut writer, b"abc").unwrap_err();
        assert!(matches!(err, BufferError::Io(ref e) if e.kind() == ErrorKind::WouldBlock));
        assert_eq!(writer.calls, 1);
    }

    #[test]
    fn buffer_is_a_writer() {
        let mut buf = ByteBuffer::new();
        write!(buf, "v={}", 7).unwrap();
        assert_eq!(buf.decode_utf8().unwrap(), "v=7");
    }
}
