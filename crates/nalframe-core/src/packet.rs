use std::time::Duration;

use bytes::{BufMut, BytesMut};

/// Every mirror packet starts with a fixed 128-byte header.
pub const PACKET_HEADER_SIZE: usize = 128;

/// Default maximum payload size: 16 MiB.
pub const DEFAULT_MAX_PAYLOAD: usize = 16 * 1024 * 1024;

const HEARTBEAT_OPTION: u16 = 0x1e;
const MEDIA_OPTION: u16 = 0x06;

/// Payload type carried in a packet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum PacketKind {
    /// Length-prefixed video units.
    VideoData = 0,
    /// An AVC decoder configuration record.
    VideoCodec = 1,
    /// Keep-alive without payload.
    Heartbeat = 2,
}

impl PacketKind {
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Value of the option field that accompanies this kind.
    pub fn option(self) -> u16 {
        match self {
            PacketKind::Heartbeat => HEARTBEAT_OPTION,
            PacketKind::VideoData | PacketKind::VideoCodec => MEDIA_OPTION,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PacketKind::VideoData => "VIDEO_DATA",
            PacketKind::VideoCodec => "VIDEO_CODEC",
            PacketKind::Heartbeat => "HEARTBEAT",
        }
    }
}

/// Configuration for mirror packet headers and the writer.
#[derive(Debug, Clone, PartialEq)]
pub struct MirrorConfig {
    /// Source screen width advertised in headers. Default: 1920.
    pub screen_width: f32,
    /// Source screen height advertised in headers. Default: 1080.
    pub screen_height: f32,
    /// Maximum payload size in bytes. Default: 16 MiB.
    pub max_payload_size: usize,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            screen_width: 1920.0,
            screen_height: 1080.0,
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}

/// Header preceding each payload on a mirroring stream.
#[derive(Debug, Clone, PartialEq)]
pub struct PacketHeader {
    pub kind: PacketKind,
    pub payload_size: u32,
    /// Time since the UNIX epoch at which the packet was produced.
    pub timestamp: Duration,
    pub screen_width: f32,
    pub screen_height: f32,
}

impl PacketHeader {
    /// Create a header for a payload of `payload_size` bytes.
    pub fn new(
        kind: PacketKind,
        payload_size: u32,
        timestamp: Duration,
        config: &MirrorConfig,
    ) -> Self {
        Self {
            kind,
            payload_size,
            timestamp,
            screen_width: config.screen_width,
            screen_height: config.screen_height,
        }
    }

    /// A heartbeat header. Heartbeats carry no payload and no timestamp.
    pub fn heartbeat() -> Self {
        Self {
            kind: PacketKind::Heartbeat,
            payload_size: 0,
            timestamp: Duration::ZERO,
            screen_width: 0.0,
            screen_height: 0.0,
        }
    }

    /// Append the 128-byte header to `dst`.
    ///
    /// Layout (all fields little-endian, unused bytes zero):
    /// ```text
    /// 0..4    payload size (u32)
    /// 4..6    kind (u16)
    /// 6..8    option (u16): 0x1e for heartbeat, 0x06 otherwise
    /// -- heartbeat stops here --
    /// 8..12   timestamp, microseconds within the second (u32)
    /// 12..16  timestamp, seconds (u32)
    /// 16..24  screen width, height (f32), codec packets only
    /// 40..48  screen width, height (f32)
    /// 48..56  horizontal, vertical padding (f32), always 0.0
    /// 56..64  supported width, height (f32)
    /// ```
    pub fn encode(&self, dst: &mut BytesMut) {
        let mut header = [0u8; PACKET_HEADER_SIZE];
        let mut head = &mut header[..];
        head.put_u32_le(self.payload_size);
        head.put_u16_le(self.kind.as_u16());
        head.put_u16_le(self.kind.option());

        if self.kind != PacketKind::Heartbeat {
            head.put_u32_le(self.timestamp.subsec_micros());
            // Seconds wrap like the 32-bit field they are sent in.
            head.put_u32_le(self.timestamp.as_secs() as u32);

            if self.kind == PacketKind::VideoCodec {
                head.put_f32_le(self.screen_width);
                head.put_f32_le(self.screen_height);
            }

            let mut screen = &mut header[40..64];
            screen.put_f32_le(self.screen_width);
            screen.put_f32_le(self.screen_height);
            screen.put_f32_le(0.0);
            screen.put_f32_le(0.0);
            screen.put_f32_le(self.screen_width);
            screen.put_f32_le(self.screen_height);
        }

        dst.reserve(PACKET_HEADER_SIZE);
        dst.put_slice(&header);
    }
}
