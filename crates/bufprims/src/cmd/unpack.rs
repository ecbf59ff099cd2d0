use bufprims_array::DynArray;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use crate::cmd::input::resolve_input;
use crate::cmd::UnpackArgs;
use crate::exit::{array_error, CliResult, SUCCESS};
use crate::output::{print_json, schema_id, OutputFormat};

#[derive(Serialize)]
struct UnpackOutput {
    schema_id: String,
    type_code: String,
    endian: String,
    count: usize,
    values: Vec<String>,
}

pub fn run(args: UnpackArgs, format: OutputFormat) -> CliResult<i32> {
    let input = resolve_input(&args.input)?;
    let array = DynArray::from_bytes(args.type_code, args.endian, &input)
        .map_err(|err| array_error("unpack failed", err))?;
    tracing::debug!(type_code = %args.type_code, count = array.len(), "unpacked values");

    let out = UnpackOutput {
        schema_id: schema_id("unpack"),
        type_code: args.type_code.to_string(),
        endian: args.endian.to_string(),
        count: array.len(),
        values: array.to_strings(),
    };

    match format {
        OutputFormat::Json => print_json(&out),
        OutputFormat::Table => print_table(&out),
        OutputFormat::Pretty => println!(
            "type={} endian={} count={} values=[{}]",
            out.type_code,
            out.endian,
            out.count,
            out.values.join(", ")
        ),
        OutputFormat::Raw => {
            for value in &out.values {
                println!("{value}");
            }
        }
    }
    Ok(SUCCESS)
}

fn print_table(out: &UnpackOutput) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["INDEX".to_string(), format!("VALUE ({})", out.type_code)]);
    for (index, value) in out.values.iter().enumerate() {
        table.add_row(vec![index.to_string(), value.clone()]);
    }
    println!("{table}");
}
