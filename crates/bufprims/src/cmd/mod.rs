use clap::{Args, Subcommand};
use std::path::PathBuf;

use bufprims_array::{Endian, TypeCode};
use bufprims_packet::PacketConfig;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod build;
pub mod checksum;
pub mod envinfo;
pub mod header;
pub mod input;
pub mod inspect;
pub mod pack;
pub mod unpack;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the additive checksum of the input bytes.
    Checksum(ChecksumArgs),
    /// Print a two-byte [version, flags] header.
    Header(HeaderArgs),
    /// Encode a packet from a header and payload.
    Build(BuildArgs),
    /// Decode a packet and verify its checksum.
    Inspect(InspectArgs),
    /// Pack typed values into bytes.
    Pack(PackArgs),
    /// Unpack bytes into typed values.
    Unpack(UnpackArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Print build and environment diagnostics.
    Envinfo(EnvinfoArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Checksum(args) => checksum::run(args, format),
        Command::Header(args) => header::run(args, format),
        Command::Build(args) => build::run(args, format),
        Command::Inspect(args) => inspect::run(args, format),
        Command::Pack(args) => pack::run(args, format),
        Command::Unpack(args) => unpack::run(args, format),
        Command::Version(args) => version::run(args),
        Command::Envinfo(args) => envinfo::run(args, format),
    }
}

/// Where input bytes come from. Defaults to stdin when nothing is given.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Hex-encoded input (whitespace ignored).
    #[arg(long, conflicts_with_all = ["text", "file"])]
    pub hex: Option<String>,
    /// UTF-8 text input.
    #[arg(long, conflicts_with_all = ["hex", "file"])]
    pub text: Option<String>,
    /// Read input from file.
    #[arg(long, conflicts_with_all = ["hex", "text"])]
    pub file: Option<PathBuf>,
    /// Maximum number of input bytes accepted from a file or stdin.
    #[arg(long, default_value_t = input::DEFAULT_INPUT_LIMIT)]
    pub max_input: usize,
}

#[derive(Args, Debug)]
pub struct ChecksumArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args, Debug)]
pub struct HeaderArgs {
    /// Protocol version (0-255).
    #[arg(value_name = "VERSION", allow_negative_numbers = true)]
    pub protocol_version: i64,
    /// Flags byte (0-255).
    #[arg(allow_negative_numbers = true)]
    pub flags: i64,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Protocol version (0-255).
    #[arg(value_name = "VERSION", allow_negative_numbers = true)]
    pub protocol_version: i64,
    /// Flags byte (0-255).
    #[arg(allow_negative_numbers = true)]
    pub flags: i64,
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub packet: PacketArgs,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub packet: PacketArgs,
    /// Fail unless the first byte (the version) equals this value.
    #[arg(long)]
    pub expect_version: Option<u8>,
}

/// Packet codec settings shared by `build` and `inspect`.
#[derive(Args, Debug)]
pub struct PacketArgs {
    /// Do not append (build) or require (inspect) a trailing checksum.
    #[arg(long)]
    pub no_checksum: bool,
    /// Maximum payload size in bytes.
    #[arg(long, default_value_t = bufprims_packet::DEFAULT_MAX_PAYLOAD)]
    pub max_payload: usize,
}

impl PacketArgs {
    pub fn config(&self) -> PacketConfig {
        PacketConfig {
            checksum: !self.no_checksum,
            max_payload_size: self.max_payload,
        }
    }
}

#[derive(Args, Debug)]
pub struct PackArgs {
    /// Element type (u8, i16, u32, f64, ... or B, h, I, d, ...).
    pub type_code: TypeCode,
    /// Values to pack.
    #[arg(required = true, allow_negative_numbers = true)]
    pub values: Vec<String>,
    /// Byte order: little, big or native.
    #[arg(long, default_value = "little")]
    pub endian: Endian,
}

#[derive(Args, Debug)]
pub struct UnpackArgs {
    /// Element type (u8, i16, u32, f64, ... or B, h, I, d, ...).
    pub type_code: TypeCode,
    #[command(flatten)]
    pub input: InputArgs,
    /// Byte order: little, big or native.
    #[arg(long, default_value = "little")]
    pub endian: Endian,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug, Default)]
pub struct EnvinfoArgs {}
