use bufprims_array::DynArray;
use serde::Serialize;

use crate::cmd::PackArgs;
use crate::exit::{array_error, CliResult, SUCCESS};
use crate::output::{
    hex_preview, print_fields, print_json, print_pretty, print_raw, schema_id, OutputFormat,
};

#[derive(Serialize)]
struct PackOutput {
    schema_id: String,
    type_code: String,
    endian: String,
    count: usize,
    byte_len: usize,
    hex: String,
}

pub fn run(args: PackArgs, format: OutputFormat) -> CliResult<i32> {
    let array = DynArray::parse(args.type_code, &args.values)
        .map_err(|err| array_error("pack failed", err))?;
    let bytes = array.to_bytes(args.endian);
    tracing::debug!(
        type_code = %args.type_code,
        count = array.len(),
        byte_len = bytes.len(),
        "packed values"
    );

    let out = PackOutput {
        schema_id: schema_id("pack"),
        type_code: args.type_code.to_string(),
        endian: args.endian.to_string(),
        count: array.len(),
        byte_len: bytes.len(),
        hex: bytes.to_hex(),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_fields(&fields(&out, &bytes)),
        OutputFormat::Pretty => print_pretty(&fields(&out, &bytes)),
        OutputFormat::Raw => print_raw(&bytes),
    }
    Ok(SUCCESS)
}

fn fields(out: &PackOutput, bytes: &[u8]) -> Vec<(&'static str, String)> {
    vec![
        ("type", out.type_code.clone()),
        ("endian", out.endian.clone()),
        ("count", out.count.to_string()),
        ("byte_len", out.byte_len.to_string()),
        ("hex", hex_preview(bytes)),
    ]
}
