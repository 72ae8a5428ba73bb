use std::io::{ErrorKind, Write};
use std::time::Duration;

use bytes::BytesMut;
use tracing::debug;

use crate::avcc::DecoderConfigRecord;
use crate::error::{Result, WriteError};
use crate::packet::{MirrorConfig, PacketHeader, PacketKind, PACKET_HEADER_SIZE};
use crate::reframe::{reframe_with, ReframeOptions};
use crate::region::Region;
use crate::scanner::find_start_code;

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Writes mirror packets (header plus payload) to any `Write` stream.
pub struct MirrorWriter<T> {
    inner: T,
    buf: BytesMut,
    config: MirrorConfig,
}

impl<T: Write> MirrorWriter<T> {
    /// Create a new mirror writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, MirrorConfig::default())
    }

    /// Create a new mirror writer with explicit configuration.
    pub fn with_config(inner: T, config: MirrorConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Send a heartbeat packet.
    pub fn heartbeat(&mut self) -> Result<(), WriteError> {
        self.buf.clear();
        PacketHeader::heartbeat().encode(&mut self.buf);
        self.write_buffered()
    }

    /// Send a decoder configuration record as a codec packet.
    pub fn send_codec(
        &mut self,
        record: &DecoderConfigRecord,
        timestamp: Duration,
    ) -> Result<(), WriteError> {
        self.send(PacketKind::VideoCodec, &record.to_bytes(), timestamp)
    }

    /// Reframe an Annex-B packet in place and send it as video data.
    ///
    /// Bytes before the first start code are not sent. A packet rejected
    /// for its size is left untouched.
    pub fn send_video(&mut self, packet: &mut [u8], timestamp: Duration) -> Result<()> {
        let options = ReframeOptions { trim_leading: true };
        let region = Region::whole(packet);
        region.validate(packet.len())?;
        let sent_len = find_start_code(packet, region.start, region.end)
            .map_or(0, |first| region.end - first);
        self.check_payload_len(sent_len)?;

        let units = reframe_with(packet, region, &options)?;
        self.send(PacketKind::VideoData, units, timestamp)?;
        Ok(())
    }

    /// Send one packet of `kind` carrying `payload`.
    pub fn send(
        &mut self,
        kind: PacketKind,
        payload: &[u8],
        timestamp: Duration,
    ) -> Result<(), WriteError> {
        self.check_payload_len(payload.len())?;

        self.buf.clear();
        self.buf.reserve(PACKET_HEADER_SIZE + payload.len());
        PacketHeader::new(kind, payload.len() as u32, timestamp, &self.config)
            .encode(&mut self.buf);
        self.buf.extend_from_slice(payload);

        debug!(kind = kind.name(), size = payload.len(), "sending packet");
        self.write_buffered()
    }

    fn check_payload_len(&self, size: usize) -> Result<(), WriteError> {
        let max = self.config.max_payload_size.min(u32::MAX as usize);
        if size > max {
            return Err(WriteError::PayloadTooLarge { size, max });
        }
        Ok(())
    }

    fn write_buffered(&mut self) -> Result<(), WriteError> {
        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(WriteError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(WriteError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<(), WriteError> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(WriteError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current writer configuration.
    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }
}
