use std::fs::File;
use std::io::Read;

use bufprims_buffer::{read_into, ByteBuffer};

use crate::cmd::InputArgs;
use crate::exit::{buffer_error, io_error, CliResult};

/// Default cap on bytes read from a file or stdin: 16 MiB.
pub const DEFAULT_INPUT_LIMIT: usize = 16 * 1024 * 1024;

pub fn resolve_input(args: &InputArgs) -> CliResult<ByteBuffer> {
    if let Some(hex) = &args.hex {
        return ByteBuffer::from_hex(hex).map_err(|err| buffer_error("--hex is not valid hex", err));
    }
    if let Some(text) = &args.text {
        return Ok(ByteBuffer::from_text(text));
    }
    if let Some(path) = &args.file {
        let context = format!("failed reading {}", path.display());
        let mut file = File::open(path).map_err(|err| io_error(&context, err))?;
        return read_limited(&mut file, args.max_input, &context);
    }
    read_limited(&mut std::io::stdin().lock(), args.max_input, "failed reading stdin")
}

fn read_limited<R: Read>(reader: &mut R, limit: usize, context: &str) -> CliResult<ByteBuffer> {
    let mut buffer = ByteBuffer::new();
    let read = read_into(reader, &mut buffer, limit).map_err(|err| buffer_error(context, err))?;
    tracing::debug!(bytes = read, "input loaded");
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::PathBuf;

    use super::*;
    use crate::exit::{DATA_INVALID, FAILURE, USAGE};

    fn args() -> InputArgs {
        InputArgs {
            hex: None,
            text: None,
            file: None,
            max_input: DEFAULT_INPUT_LIMIT,
        }
    }

    fn unique_temp_file(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "bufprims-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ))
    }

    #[test]
    fn hex_input() {
        let buf = resolve_input(&InputArgs {
            hex: Some("01 02 ff".to_string()),
            ..args()
        })
        .unwrap();
        assert_eq!(buf, [0x01, 0x02, 0xFF]);

        let err = resolve_input(&InputArgs {
            hex: Some("0g".to_string()),
            ..args()
        })
        .unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn text_input() {
        let buf = resolve_input(&InputArgs {
            text: Some("hi".to_string()),
            ..args()
        })
        .unwrap();
        assert_eq!(buf.as_slice(), b"hi");
    }

    #[test]
    fn file_input_and_limit() {
        let path = unique_temp_file("input");
        std::fs::write(&path, [1u8, 2, 3, 4]).expect("temp file should be writable");

        let buf = resolve_input(&InputArgs {
            file: Some(path.clone()),
            ..args()
        })
        .unwrap();
        assert_eq!(buf, [1, 2, 3, 4]);

        let err = resolve_input(&InputArgs {
            file: Some(path.clone()),
            max_input: 2,
            ..args()
        })
        .unwrap_err();
        assert_eq!(err.code, DATA_INVALID);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_fails() {
        let err = resolve_input(&InputArgs {
            file: Some(unique_temp_file("missing")),
            ..args()
        })
        .unwrap_err();
        assert_eq!(err.code, FAILURE);
    }

    #[test]
    fn read_limited_collects_reader() {
        let buf = read_limited(&mut Cursor::new(b"abc".to_vec()), 8, "test").unwrap();
        assert_eq!(buf.as_slice(), b"abc");
    }
}
