use std::ops::Range;

use tracing::{debug, trace};

use crate::error::RegionError;
use crate::region::Region;
use crate::scanner::{find_start_code, LENGTH_FIELD_LEN};
use crate::units::measure;

/// Summary of one reframing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reframed {
    /// Offset of the first rewritten start code, if any was found.
    pub first_marker: Option<usize>,
    /// Number of start codes rewritten.
    pub units: usize,
}

/// Options for [`reframe_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReframeOptions {
    /// Drop bytes before the first start code from the returned slice.
    pub trim_leading: bool,
}

impl ReframeOptions {
    /// Range of the reframed buffer to hand on after reframing `region`.
    pub fn output_range(&self, region: Region, summary: &Reframed) -> Range<usize> {
        let from = match (self.trim_leading, summary.first_marker) {
            (false, _) => region.start,
            (true, Some(first)) => first,
            (true, None) => region.end,
        };
        from..region.end
    }
}

/// Rewrite every start code in `buf[start..end]` as the big-endian length of
/// the unit that follows it.
///
/// The buffer keeps its size; only the 4 bytes of each located start code
/// change. A region without start codes is left as it is. The last unit runs
/// to `end`. See [`find_start_code`] for which start codes are located.
///
/// Bounds are checked before anything is written. Running this twice over
/// the same bytes is not meaningful: a rewritten length of 1 reads as a
/// start code again.
pub fn reframe(buf: &mut [u8], start: usize, end: usize) -> Result<Reframed, RegionError> {
    reframe_region(buf, Region::new(start, end))
}

/// [`reframe`] over the whole buffer.
pub fn reframe_all(buf: &mut [u8]) -> Result<Reframed, RegionError> {
    let region = Region::whole(buf);
    reframe_region(buf, region)
}

/// [`reframe`] over a [`Region`].
pub fn reframe_region(buf: &mut [u8], region: Region) -> Result<Reframed, RegionError> {
    region.validate(buf.len())?;

    let first_marker = find_start_code(buf, region.start, region.end);
    let mut next = first_marker;
    let mut units = 0usize;

    while let Some(at) = next {
        let (unit, following) = measure(buf, at, region.end);
        // A validated region bounds every unit below 2^32.
        let len = unit.len as u32;
        buf[at..at + LENGTH_FIELD_LEN].copy_from_slice(&len.to_be_bytes());
        trace!(offset = at, len, "start code rewritten");

        units += 1;
        next = following;
    }

    debug!(
        start = region.start,
        end = region.end,
        units,
        first_marker = ?first_marker,
        "region reframed"
    );

    Ok(Reframed {
        first_marker,
        units,
    })
}

/// Reframe `region` and return the resulting length-prefixed bytes.
///
/// With [`ReframeOptions::trim_leading`] the slice starts at the first unit,
/// dropping any leading bytes that were not start-code delimited; a region
/// without start codes then yields an empty slice.
pub fn reframe_with<'a>(
    buf: &'a mut [u8],
    region: Region,
    options: &ReframeOptions,
) -> Result<&'a [u8], RegionError> {
    let summary = reframe_region(buf, region)?;
    Ok(&buf[options.output_range(region, &summary)])
}
