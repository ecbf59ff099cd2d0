use bufprims_packet::checksum;
use serde::Serialize;

use crate::cmd::input::resolve_input;
use crate::cmd::ChecksumArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{
    byte_hex, print_fields, print_json, print_pretty, print_raw, schema_id, OutputFormat,
};

#[derive(Serialize)]
struct ChecksumOutput {
    schema_id: String,
    length: usize,
    checksum: u8,
    checksum_hex: String,
}

pub fn run(args: ChecksumArgs, format: OutputFormat) -> CliResult<i32> {
    let input = resolve_input(&args.input)?;
    let sum = checksum(&input);
    tracing::debug!(len = input.len(), checksum = sum, "computed checksum");

    let out = ChecksumOutput {
        schema_id: schema_id("checksum"),
        length: input.len(),
        checksum: sum,
        checksum_hex: byte_hex(sum),
    };
    print_checksum(&out, format);
    Ok(SUCCESS)
}

fn print_checksum(out: &ChecksumOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(out),
        OutputFormat::Table => print_fields(&fields(out)),
        OutputFormat::Pretty => print_pretty(&fields(out)),
        OutputFormat::Raw => print_raw(&[out.checksum]),
    }
}

fn fields(out: &ChecksumOutput) -> Vec<(&'static str, String)> {
    vec![
        ("length", out.length.to_string()),
        ("checksum", out.checksum.to_string()),
        ("hex", out.checksum_hex.clone()),
    ]
}
