use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
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

#[derive(Serialize)]
pub struct UnitRow {
    pub index: usize,
    pub marker_offset: usize,
    pub payload_offset: usize,
    pub len: usize,
    pub first_byte: Option<u8>,
}

#[derive(Serialize)]
pub struct InspectReport {
    pub file: String,
    pub start: usize,
    pub end: usize,
    pub units: Vec<UnitRow>,
}

#[derive(Serialize)]
pub struct ReframeReport {
    pub input: String,
    pub output: String,
    pub start: usize,
    pub end: usize,
    pub units: usize,
    pub first_marker: Option<usize>,
    pub bytes_written: usize,
}

#[derive(Serialize)]
pub struct RecordReport {
    pub output: String,
    pub profile: u8,
    pub compatibility: u8,
    pub level: u8,
    pub sps_len: usize,
    pub pps_len: usize,
    pub record_len: usize,
}

#[derive(Serialize)]
pub struct MirrorReport {
    pub output: String,
    pub packets: usize,
    pub bytes_written: usize,
}

pub fn print_inspect(report: &InspectReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "MARKER", "PAYLOAD", "LENGTH", "FIRST BYTE"]);
            for unit in &report.units {
                table.add_row(vec![
                    unit.index.to_string(),
                    unit.marker_offset.to_string(),
                    unit.payload_offset.to_string(),
                    unit.len.to_string(),
                    hex_byte(unit.first_byte),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "{} [{}..{}): {} unit(s)",
                report.file,
                report.start,
                report.end,
                report.units.len()
            );
            for unit in &report.units {
                println!(
                    "  #{} marker={} payload={} len={} first={}",
                    unit.index,
                    unit.marker_offset,
                    unit.payload_offset,
                    unit.len,
                    hex_byte(unit.first_byte)
                );
            }
        }
    }
}

pub fn print_reframe(report: &ReframeReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Table => print_fields(&[
            ("INPUT", report.input.clone()),
            ("OUTPUT", report.output.clone()),
            ("REGION", format!("{}..{}", report.start, report.end)),
            ("UNITS", report.units.to_string()),
            ("FIRST MARKER", optional(report.first_marker)),
            ("BYTES WRITTEN", report.bytes_written.to_string()),
        ]),
        OutputFormat::Pretty => println!(
            "{} -> {}: {} unit(s), first marker {}, {} bytes",
            report.input,
            report.output,
            report.units,
            optional(report.first_marker),
            report.bytes_written
        ),
    }
}

pub fn print_record(report: &RecordReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Table => print_fields(&[
            ("OUTPUT", report.output.clone()),
            ("PROFILE", report.profile.to_string()),
            ("COMPATIBILITY", format!("0x{:02x}", report.compatibility)),
            ("LEVEL", report.level.to_string()),
            ("SPS", format!("{} bytes", report.sps_len)),
            ("PPS", format!("{} bytes", report.pps_len)),
            ("RECORD", format!("{} bytes", report.record_len)),
        ]),
        OutputFormat::Pretty => println!(
            "{}: profile={} level={} sps={} pps={} record={}",
            report.output,
            report.profile,
            report.level,
            report.sps_len,
            report.pps_len,
            report.record_len
        ),
    }
}

pub fn print_mirror(report: &MirrorReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Table => print_fields(&[
            ("OUTPUT", report.output.clone()),
            ("PACKETS", report.packets.to_string()),
            ("BYTES WRITTEN", report.bytes_written.to_string()),
        ]),
        OutputFormat::Pretty => println!(
            "{}: {} packet(s), {} bytes",
            report.output, report.packets, report.bytes_written
        ),
    }
}

pub fn print_raw(data: &[u8]) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    out.write_all(data)?;
    out.flush()
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn print_fields(fields: &[(&str, String)]) {
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

fn hex_byte(byte: Option<u8>) -> String {
    byte.map(|b| format!("0x{b:02x}"))
        .unwrap_or_else(|| "-".to_string())
}

fn optional(value: Option<usize>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "none".to_string())
}
