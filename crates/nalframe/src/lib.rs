//! Annex-B to length-prefixed video reframing.
//!
//! nalframe rewrites start-code-delimited video streams into the
//! length-prefixed form expected by MP4-style containers and screen-mirroring
//! receivers, without copying or resizing the buffer.
//!
//! # Crate Structure
//!
//! - [`annexb`] — Start code scanning, in-place reframing, unit inspection,
//!   decoder configuration records and mirror packet framing
//!
//! The `nalframe` binary (behind the default `cli` feature) wraps these for
//! files on disk.

/// Re-export core types.
pub mod annexb {
    pub use nalframe_core::*;
}

pub use nalframe_core::{find_start_code, reframe, Error, Region, RegionError, Reframed};
