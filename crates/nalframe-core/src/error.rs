/// Rejected region bounds.
///
/// Returned before any byte is written, so a buffer handed to a call that
/// fails with one of these is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    /// The region starts after it ends.
    #[error("region start {start} is past region end {end}")]
    StartAfterEnd { start: usize, end: usize },

    /// The region extends beyond the buffer.
    #[error("region end {end} is past buffer length {len}")]
    EndPastBuffer { end: usize, len: usize },

    /// A unit in this region could be too long for a 4-byte length field.
    #[error("region too large ({size} bytes, max {max})")]
    UnitTooLarge { size: usize, max: usize },
}

/// Errors building an AVC decoder configuration record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigRecordError {
    /// Extradata must hold exactly one SPS followed by one PPS.
    #[error("expected 2 parameter sets (SPS, PPS) in extradata, found {found}")]
    ParameterSetCount { found: usize },

    /// The SPS is too short to carry profile, compatibility and level.
    #[error("SPS too short ({len} bytes, need at least 4)")]
    SpsTooShort { len: usize },

    /// A parameter set does not fit its 16-bit length field.
    #[error("{kind} too large ({size} bytes, max 65535)")]
    ParameterSetTooLarge { kind: &'static str, size: usize },
}

/// Errors reading a length-prefixed buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A length field or the unit it announces runs past the buffer.
    #[error("truncated unit at offset {offset} (need {needed} bytes, {available} available)")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
}

/// Errors writing mirror packets.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred while writing packets.
    #[error("packet I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink stopped accepting bytes.
    #[error("connection closed (incomplete packet)")]
    ConnectionClosed,
}

/// Any error produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Region(#[from] RegionError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    ConfigRecord(#[from] ConfigRecordError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
