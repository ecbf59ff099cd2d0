use bufprims_packet::{build_header, Header};
use serde::Serialize;

use crate::cmd::HeaderArgs;
use crate::exit::{packet_error, CliResult, SUCCESS};
use crate::output::{
    byte_hex, print_fields, print_json, print_pretty, print_raw, schema_id, OutputFormat,
};

#[derive(Serialize)]
struct HeaderOutput {
    schema_id: String,
    version: u8,
    flags: u8,
    hex: String,
}

pub fn run(args: HeaderArgs, format: OutputFormat) -> CliResult<i32> {
    let header = Header::try_from_ints(args.protocol_version, args.flags)
        .map_err(|err| packet_error("invalid header", err))?;
    let bytes = build_header(header.version, header.flags);

    let out = HeaderOutput {
        schema_id: schema_id("header"),
        version: header.version,
        flags: header.flags,
        hex: bytes.to_hex(),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_fields(&fields(&out)),
        OutputFormat::Pretty => print_pretty(&fields(&out)),
        OutputFormat::Raw => print_raw(&bytes),
    }
    Ok(SUCCESS)
}

fn fields(out: &HeaderOutput) -> Vec<(&'static str, String)> {
    vec![
        ("version", out.version.to_string()),
        ("flags", byte_hex(out.flags)),
        ("hex", out.hex.clone()),
    ]
}
