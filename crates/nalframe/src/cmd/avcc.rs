use nalframe_core::DecoderConfigRecord;
use tracing::info;

use crate::cmd::{display_output, read_input, refuse_binary_on_terminal, write_output, AvccArgs};
use crate::exit::{core_error, io_error, CliResult, SUCCESS};
use crate::output::{print_raw, print_record, OutputFormat, RecordReport};

pub fn run(args: AvccArgs, format: OutputFormat) -> CliResult<i32> {
    refuse_binary_on_terminal(args.output.as_deref(), "record")?;

    let extradata = read_input(&args.extradata)?;
    let record = DecoderConfigRecord::from_annexb(&extradata)
        .map_err(|err| core_error("invalid extradata", err))?;
    let bytes = record.to_bytes();

    let report = RecordReport {
        output: display_output(args.output.as_deref()),
        profile: record.profile(),
        compatibility: record.compatibility(),
        level: record.level(),
        sps_len: record.sps().len(),
        pps_len: record.pps().len(),
        record_len: bytes.len(),
    };

    match &args.output {
        Some(path) => {
            write_output(path, &bytes)?;
            print_record(&report, format);
        }
        None => {
            print_raw(&bytes).map_err(|err| io_error("failed writing stdout", err))?;
            info!(
                profile = report.profile,
                level = report.level,
                bytes = report.record_len,
                "decoder configuration record written"
            );
        }
    }

    Ok(SUCCESS)
}
