mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "bufprims", version, about = "Byte buffer and packet inspection CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "info",
        env = "BUFPRIMS_LOG_LEVEL",
        global = true
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_checksum_subcommand() {
        let cli = Cli::try_parse_from(["bufprims", "checksum", "--hex", "010203"])
            .expect("checksum args should parse");

        assert!(matches!(cli.command, Command::Checksum(_)));
    }

    #[test]
    fn rejects_conflicting_input_args() {
        let err = Cli::try_parse_from([
            "bufprims", "checksum", "--hex", "01", "--text", "hello",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parses_pack_with_negative_values() {
        let cli = Cli::try_parse_from([
            "bufprims", "pack", "i16", "-1", "2", "--endian", "big",
        ])
        .expect("pack args should parse");

        match cli.command {
            Command::Pack(args) => {
                assert_eq!(args.values, vec!["-1", "2"]);
                assert_eq!(args.endian, bufprims_array::Endian::Big);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_type_code() {
        let err = Cli::try_parse_from(["bufprims", "pack", "u128", "1"])
            .expect_err("unknown type code should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
