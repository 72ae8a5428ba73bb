use nalframe_core::{reframe_region, ReframeOptions};
use tracing::info;

use crate::cmd::{
    display_output, read_input, refuse_binary_on_terminal, write_output, ReframeArgs,
};
use crate::exit::{io_error, region_error, CliResult, SUCCESS};
use crate::output::{print_raw, print_reframe, OutputFormat, ReframeReport};

pub fn run(args: ReframeArgs, format: OutputFormat) -> CliResult<i32> {
    refuse_binary_on_terminal(args.output.as_deref(), "output")?;

    let mut data = read_input(&args.input)?;
    let region = args.region.resolve(data.len());
    let options = ReframeOptions {
        trim_leading: args.trim_leading,
    };

    let summary =
        reframe_region(&mut data, region).map_err(|err| region_error("reframe failed", err))?;
    let out = &data[options.output_range(region, &summary)];

    let report = ReframeReport {
        input: args.input.display().to_string(),
        output: display_output(args.output.as_deref()),
        start: region.start,
        end: region.end,
        units: summary.units,
        first_marker: summary.first_marker,
        bytes_written: out.len(),
    };

    match &args.output {
        Some(path) => {
            write_output(path, out)?;
            print_reframe(&report, format);
        }
        None => {
            print_raw(out).map_err(|err| io_error("failed writing stdout", err))?;
            info!(
                input = %report.input,
                units = report.units,
                first_marker = ?report.first_marker,
                bytes = report.bytes_written,
                "reframed"
            );
        }
    }

    Ok(SUCCESS)
}
