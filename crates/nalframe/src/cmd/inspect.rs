use nalframe_core::units;

use crate::cmd::{read_input, InspectArgs};
use crate::exit::{region_error, CliResult, SUCCESS};
use crate::output::{print_inspect, InspectReport, OutputFormat, UnitRow};

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let data = read_input(&args.input)?;
    let region = args.region.resolve(data.len());

    let rows = units(&data, region)
        .map_err(|err| region_error("inspect failed", err))?
        .enumerate()
        .map(|(index, unit)| UnitRow {
            index,
            marker_offset: unit.marker_offset,
            payload_offset: unit.payload_offset,
            len: unit.len,
            first_byte: data[unit.payload_range()].first().copied(),
        })
        .collect();

    let report = InspectReport {
        file: args.input.display().to_string(),
        start: region.start,
        end: region.end,
        units: rows,
    };

    print_inspect(&report, format);
    Ok(SUCCESS)
}
