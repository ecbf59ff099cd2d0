use bufprims_packet::{decode_packet, validate_packet};
use serde::Serialize;

use crate::cmd::input::resolve_input;
use crate::cmd::InspectArgs;
use crate::exit::{packet_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{
    byte_hex, payload_preview, print_fields, print_json, print_pretty, print_raw, schema_id,
    OutputFormat,
};

#[derive(Serialize)]
struct InspectOutput {
    schema_id: String,
    version: u8,
    flags: u8,
    payload_size: usize,
    payload_hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    checksum: Option<u8>,
    checksum_verified: bool,
}

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let wire = resolve_input(&args.input)?;

    if let Some(expected) = args.expect_version {
        if !validate_packet(&wire, expected) {
            return Err(CliError::new(
                DATA_INVALID,
                format!(
                    "packet does not start with version {expected} (first byte: {})",
                    wire.first().map_or_else(|| "none".to_string(), |b| b.to_string())
                ),
            ));
        }
    }

    let config = args.packet.config();
    let packet =
        decode_packet(&wire, &config).map_err(|err| packet_error("inspect failed", err))?;
    let payload = packet
        .payload
        .as_slice()
        .map_err(|err| packet_error("inspect failed", err.into()))?;

    let out = InspectOutput {
        schema_id: schema_id("packet-inspect"),
        version: packet.header.version,
        flags: packet.header.flags,
        payload_size: payload.len(),
        payload_hex: hex::encode(payload),
        checksum: packet.checksum,
        checksum_verified: packet.checksum.is_some(),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_fields(&fields(&out, payload)),
        OutputFormat::Pretty => print_pretty(&fields(&out, payload)),
        OutputFormat::Raw => print_raw(payload),
    }
    Ok(SUCCESS)
}

fn fields(out: &InspectOutput, payload: &[u8]) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("version", out.version.to_string()),
        ("flags", byte_hex(out.flags)),
        ("payload_size", out.payload_size.to_string()),
        ("payload", payload_preview(payload)),
    ];
    match out.checksum {
        Some(sum) => fields.push(("checksum", format!("{} (ok)", byte_hex(sum)))),
        None => fields.push(("checksum", "not checked".to_string())),
    }
    fields
}
