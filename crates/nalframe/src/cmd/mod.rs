use clap::{Args, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use nalframe_core::Region;

use crate::exit::{io_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod avcc;
pub mod inspect;
pub mod mirror;
pub mod reframe;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rewrite start codes as 4-byte big-endian unit lengths.
    Reframe(ReframeArgs),
    /// List the start-code-delimited units of a file.
    Inspect(InspectArgs),
    /// Build an AVC decoder configuration record from encoder extradata.
    Avcc(AvccArgs),
    /// Package extradata and packets into a mirroring stream.
    Mirror(MirrorArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Reframe(args) => reframe::run(args, format),
        Command::Inspect(args) => inspect::run(args, format),
        Command::Avcc(args) => avcc::run(args, format),
        Command::Mirror(args) => mirror::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Optional region bounds shared by the commands that scan a file.
#[derive(Args, Debug, Default)]
pub struct RegionArgs {
    /// First byte of the region (default: 0).
    #[arg(long)]
    pub start: Option<usize>,
    /// End of the region, exclusive (default: file length).
    #[arg(long)]
    pub end: Option<usize>,
}

impl RegionArgs {
    pub fn resolve(&self, len: usize) -> Region {
        Region::new(self.start.unwrap_or(0), self.end.unwrap_or(len))
    }
}

#[derive(Args, Debug)]
pub struct ReframeArgs {
    /// Annex-B input file.
    pub input: PathBuf,
    /// Output file. Writes raw bytes to stdout when omitted.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
    #[command(flatten)]
    pub region: RegionArgs,
    /// Drop bytes before the first start code from the output.
    #[arg(long)]
    pub trim_leading: bool,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Annex-B input file.
    pub input: PathBuf,
    #[command(flatten)]
    pub region: RegionArgs,
}

#[derive(Args, Debug)]
pub struct AvccArgs {
    /// Encoder extradata holding one SPS and one PPS in Annex-B form.
    pub extradata: PathBuf,
    /// Output file. Writes the raw record to stdout when omitted.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct MirrorArgs {
    /// Encoder extradata holding one SPS and one PPS in Annex-B form.
    #[arg(long, value_name = "FILE")]
    pub extradata: PathBuf,
    /// Annex-B packet files, sent in order as video data.
    #[arg(long = "packet", value_name = "FILE", required = true)]
    pub packets: Vec<PathBuf>,
    /// Output file. Writes the stream to stdout when omitted.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
    /// Source screen width advertised in packet headers.
    #[arg(long, default_value = "1920")]
    pub width: f32,
    /// Source screen height advertised in packet headers.
    #[arg(long, default_value = "1080")]
    pub height: f32,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub(crate) fn read_input(path: &Path) -> CliResult<Vec<u8>> {
    std::fs::read(path).map_err(|err| io_error(&format!("failed reading {}", path.display()), err))
}

pub(crate) fn write_output(path: &Path, data: &[u8]) -> CliResult<()> {
    std::fs::write(path, data)
        .map_err(|err| io_error(&format!("failed writing {}", path.display()), err))
}

pub(crate) fn display_output(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub(crate) fn refuse_binary_on_terminal(path: Option<&Path>, what: &str) -> CliResult<()> {
    if path.is_none() && std::io::stdout().is_terminal() {
        return Err(CliError::new(
            USAGE,
            format!("refusing to write binary {what} to a terminal; pass --output"),
        ));
    }
    Ok(())
}
