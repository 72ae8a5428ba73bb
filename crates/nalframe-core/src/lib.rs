//! In-place conversion of Annex-B video streams to length-prefixed units.
//!
//! An Annex-B buffer separates units with the 4-byte start code
//! `00 00 00 01`. Because a 4-byte big-endian length field is exactly as
//! wide, each start code can be overwritten with the length of the unit that
//! follows it without moving a single payload byte:
//!
//! ```text
//! 00 00 00 01 AA BB 00 00 00 01 CC   (Annex-B)
//! 00 00 00 02 AA BB 00 00 00 01 CC   (length-prefixed)
//! ```
//!
//! Around that core sit the pieces a screen-mirroring sender needs: the AVC
//! decoder configuration record built from encoder extradata, and the
//! 128-byte packet header that frames every payload on the stream.

pub mod avcc;
pub mod error;
pub mod packet;
pub mod reframe;
pub mod region;
pub mod scanner;
pub mod units;
pub mod writer;

pub use avcc::DecoderConfigRecord;
pub use error::{ConfigRecordError, Error, ParseError, RegionError, Result, WriteError};
pub use packet::{MirrorConfig, PacketHeader, PacketKind, DEFAULT_MAX_PAYLOAD, PACKET_HEADER_SIZE};
pub use reframe::{reframe, reframe_all, reframe_region, reframe_with, ReframeOptions, Reframed};
pub use region::{Region, MAX_REGION_LEN};
pub use scanner::{find_start_code, LENGTH_FIELD_LEN, START_CODE, START_CODE_LEN};
pub use units::{read_length_prefixed, units, LengthPrefixedUnits, Unit, Units};
pub use writer::MirrorWriter;
