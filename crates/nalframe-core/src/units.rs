use crate::error::{ParseError, RegionError};
use crate::region::Region;
use crate::scanner::{find_start_code, LENGTH_FIELD_LEN, START_CODE_LEN};

/// One start-code-delimited unit of an Annex-B region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    /// Offset of the start code that introduces the unit.
    pub marker_offset: usize,
    /// Offset of the first payload byte.
    pub payload_offset: usize,
    /// Payload bytes up to the next start code or the region end.
    pub len: usize,
}

impl Unit {
    /// Payload range within the scanned buffer.
    pub fn payload_range(&self) -> std::ops::Range<usize> {
        self.payload_offset..self.payload_offset + self.len
    }
}

/// Measure the unit whose start code sits at `at`, and locate the next one.
pub(crate) fn measure(buf: &[u8], at: usize, end: usize) -> (Unit, Option<usize>) {
    let following = find_start_code(buf, at + START_CODE_LEN, end);
    let boundary = following.unwrap_or(end);
    let unit = Unit {
        marker_offset: at,
        payload_offset: at + START_CODE_LEN,
        len: boundary - at - START_CODE_LEN,
    };
    (unit, following)
}

/// Iterator over the units of an Annex-B region, without modifying it.
///
/// Yields exactly the units [`reframe`](crate::reframe) would rewrite.
#[derive(Debug, Clone)]
pub struct Units<'a> {
    buf: &'a [u8],
    end: usize,
    next: Option<usize>,
}

impl<'a> Iterator for Units<'a> {
    type Item = Unit;

    fn next(&mut self) -> Option<Unit> {
        let at = self.next?;
        let (unit, following) = measure(self.buf, at, self.end);
        self.next = following;
        Some(unit)
    }
}

/// List the units of `region` in `buf`.
pub fn units(buf: &[u8], region: Region) -> Result<Units<'_>, RegionError> {
    region.validate(buf.len())?;
    Ok(Units {
        buf,
        end: region.end,
        next: find_start_code(buf, region.start, region.end),
    })
}

/// Iterator over the payloads of a length-prefixed buffer.
///
/// Stops after the first truncated unit, which is reported as an error.
#[derive(Debug, Clone)]
pub struct LengthPrefixedUnits<'a> {
    buf: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> Iterator for LengthPrefixedUnits<'a> {
    type Item = Result<&'a [u8], ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos == self.buf.len() {
            return None;
        }

        let rest = &self.buf[self.pos..];
        let Some((field, body)) = rest.split_first_chunk::<LENGTH_FIELD_LEN>() else {
            self.failed = true;
            return Some(Err(ParseError::Truncated {
                offset: self.pos,
                needed: LENGTH_FIELD_LEN,
                available: rest.len(),
            }));
        };

        let len = u32::from_be_bytes(*field) as usize;
        if body.len() < len {
            self.failed = true;
            return Some(Err(ParseError::Truncated {
                offset: self.pos,
                needed: LENGTH_FIELD_LEN + len,
                available: rest.len(),
            }));
        }

        self.pos += LENGTH_FIELD_LEN + len;
        Some(Ok(&body[..len]))
    }
}

/// Walk a buffer produced by [`reframe`](crate::reframe), trimmed to its first unit.
pub fn read_length_prefixed(buf: &[u8]) -> LengthPrefixedUnits<'_> {
    LengthPrefixedUnits {
        buf,
        pos: 0,
        failed: false,
    }
}
