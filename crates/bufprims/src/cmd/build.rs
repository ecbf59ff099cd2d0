use bufprims_packet::{Header, Packet};
use serde::Serialize;

use crate::cmd::input::resolve_input;
use crate::cmd::BuildArgs;
use crate::exit::{packet_error, CliResult, SUCCESS};
use crate::output::{
    byte_hex, hex_preview, print_fields, print_json, print_pretty, print_raw, schema_id,
    OutputFormat,
};

#[derive(Serialize)]
struct BuildOutput {
    schema_id: String,
    version: u8,
    flags: u8,
    payload_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    checksum: Option<u8>,
    wire_size: usize,
    wire_hex: String,
}

pub fn run(args: BuildArgs, format: OutputFormat) -> CliResult<i32> {
    let header = Header::try_from_ints(args.protocol_version, args.flags)
        .map_err(|err| packet_error("invalid header", err))?;
    let payload = resolve_input(&args.input)?;
    let config = args.packet.config();

    let packet = Packet::new(header, payload.freeze());
    let wire = packet
        .encode(&config)
        .map_err(|err| packet_error("encode failed", err))?;
    tracing::debug!(wire_size = wire.len(), checksum = config.checksum, "built packet");

    let out = BuildOutput {
        schema_id: schema_id("packet-built"),
        version: header.version,
        flags: header.flags,
        payload_size: packet.payload.len(),
        checksum: config.checksum.then(|| wire.last().copied()).flatten(),
        wire_size: wire.len(),
        wire_hex: wire.to_hex(),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_fields(&fields(&out, &wire)),
        OutputFormat::Pretty => print_pretty(&fields(&out, &wire)),
        OutputFormat::Raw => print_raw(&wire),
    }
    Ok(SUCCESS)
}

fn fields(out: &BuildOutput, wire: &[u8]) -> Vec<(&'static str, String)> {
    vec![
        ("version", out.version.to_string()),
        ("flags", byte_hex(out.flags)),
        ("payload_size", out.payload_size.to_string()),
        (
            "checksum",
            out.checksum.map_or_else(|| "none".to_string(), byte_hex),
        ),
        ("wire_size", out.wire_size.to_string()),
        ("wire", hex_preview(wire)),
    ]
}
