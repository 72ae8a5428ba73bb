use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use nalframe_core::{DecoderConfigRecord, MirrorConfig, MirrorWriter};
use tracing::{debug, info};

use crate::cmd::{display_output, read_input, refuse_binary_on_terminal, MirrorArgs};
use crate::exit::{core_error, io_error, write_error, CliResult, SUCCESS};
use crate::output::{print_mirror, MirrorReport, OutputFormat};

pub fn run(args: MirrorArgs, format: OutputFormat) -> CliResult<i32> {
    refuse_binary_on_terminal(args.output.as_deref(), "stream")?;

    let extradata = read_input(&args.extradata)?;
    let record = DecoderConfigRecord::from_annexb(&extradata)
        .map_err(|err| core_error("invalid extradata", err))?;
    let config = MirrorConfig {
        screen_width: args.width,
        screen_height: args.height,
        ..MirrorConfig::default()
    };

    let (packets, bytes_written) = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|err| io_error(&format!("failed creating {}", path.display()), err))?;
            stream(BufWriter::new(file), &args, &record, config)?
        }
        None => stream(std::io::stdout().lock(), &args, &record, config)?,
    };

    let report = MirrorReport {
        output: display_output(args.output.as_deref()),
        packets,
        bytes_written,
    };
    if args.output.is_some() {
        print_mirror(&report, format);
    } else {
        info!(packets, bytes = bytes_written, "mirror stream written");
    }

    Ok(SUCCESS)
}

/// Heartbeat, codec record, then one video packet per input file.
fn stream<W: Write>(
    sink: W,
    args: &MirrorArgs,
    record: &DecoderConfigRecord,
    config: MirrorConfig,
) -> CliResult<(usize, usize)> {
    let mut writer = MirrorWriter::with_config(CountingWriter::new(sink), config);

    writer
        .heartbeat()
        .map_err(|err| write_error("heartbeat failed", err))?;
    writer
        .send_codec(record, now())
        .map_err(|err| write_error("codec packet failed", err))?;
    let mut packets = 2;

    for path in &args.packets {
        let mut packet = read_input(path)?;
        writer
            .send_video(&mut packet, now())
            .map_err(|err| core_error(&format!("packet {} failed", path.display()), err))?;
        debug!(packet = %path.display(), "video packet sent");
        packets += 1;
    }

    Ok((packets, writer.get_ref().written))
}

fn now() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}

struct CountingWriter<W> {
    inner: W,
    written: usize,
}

impl<W> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_writer_tracks_bytes() {
        let mut writer = CountingWriter::new(Vec::<u8>::new());
        writer.write_all(b"abc").unwrap();
        writer.write_all(b"de").unwrap();
        assert_eq!(writer.written, 5);
        assert_eq!(writer.inner, b"abcde");
    }
}
