use crate::error::RegionError;
use crate::scanner::START_CODE_LEN;

/// Largest region a single call accepts.
///
/// A unit is at most the region length minus one start code, and must fit a
/// `u32` length field.
pub const MAX_REGION_LEN: usize = (u32::MAX as usize).saturating_add(START_CODE_LEN);

/// Half-open offset range `[start, end)` of a buffer subject to reframing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    /// Create a region. Bounds are checked against a buffer by [`Region::validate`].
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The region covering all of `buf`.
    pub fn whole(buf: &[u8]) -> Self {
        Self::new(0, buf.len())
    }

    /// Number of bytes in the region (zero if `start > end`).
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check `start <= end <= buf_len` and that every unit fits a 4-byte length.
    pub fn validate(&self, buf_len: usize) -> Result<(), RegionError> {
        if self.start > self.end {
            return Err(RegionError::StartAfterEnd {
                start: self.start,
                end: self.end,
            });
        }
        if self.end > buf_len {
            return Err(RegionError::EndPastBuffer {
                end: self.end,
                len: buf_len,
            });
        }
        if self.len() > MAX_REGION_LEN {
            return Err(RegionError::UnitTooLarge {
                size: self.len(),
                max: MAX_REGION_LEN,
            });
        }
        Ok(())
    }
}
