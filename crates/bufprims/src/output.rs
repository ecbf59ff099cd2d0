use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub const SCHEMA_BASE: &str = "https://schemas.3leaps.dev/bufprims/cli/v1";

pub fn schema_id(name: &str) -> String {
    format!("{SCHEMA_BASE}/{name}.schema.json")
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

/// Print a two-column field/value table.
pub fn print_fields(fields: &[(&str, String)]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["FIELD", "VALUE"]);
    for (name, value) in fields {
        table.add_row(vec![name.to_string(), value.clone()]);
    }
    println!("{table}");
}

/// Print `name=value` pairs on one line.
pub fn print_pretty(fields: &[(&str, String)]) {
    let line = fields
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(" ");
    println!("{line}");
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = bufprims_buffer::write_all_from(&mut out, data);
    let _ = out.flush();
}

/// Render a payload as text when it is printable UTF-8, otherwise as hex.
pub fn payload_preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) if !text.chars().any(char::is_control) => text.to_string(),
        _ => format!("<binary {} bytes: {}>", payload.len(), hex_preview(payload)),
    }
}

/// Lowercase hex, truncated to the first 64 bytes.
pub fn hex_preview(data: &[u8]) -> String {
    const MAX: usize = 64;
    if data.len() <= MAX {
        return hex::encode(data);
    }
    format!("{}...", hex::encode(&data[..MAX]))
}

pub fn byte_hex(byte: u8) -> String {
    format!("0x{byte:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_prefers_text() {
        assert_eq!(payload_preview(b"hello"), "hello");
        assert_eq!(payload_preview(&[0xff, 0x00]), "<binary 2 bytes: ff00>");
        assert_eq!(payload_preview(b"a\x01"), "<binary 2 bytes: 6101>");
    }

    #[test]
    fn hex_preview_truncates() {
        let long = vec![0xAB; 100];
        let preview = hex_preview(&long);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.len(), 64 * 2 + 3);
    }

    #[test]
    fn schema_ids_are_versioned() {
        assert_eq!(
            schema_id("checksum"),
            "https://schemas.3leaps.dev/bufprims/cli/v1/checksum.schema.json"
        );
        assert_eq!(byte_hex(6), "0x06");
    }
}
