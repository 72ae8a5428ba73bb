/// Annex-B start code: `00 00 00 01`.
pub const START_CODE: [u8; 4] = [0x00, 0x00, 0x00, 0x01];

/// Width of [`START_CODE`] in bytes.
pub const START_CODE_LEN: usize = START_CODE.len();

/// Width of the big-endian length field written over each start code.
pub const LENGTH_FIELD_LEN: usize = 4;

// In-place rewriting only works while the two widths match.
const _: () = assert!(START_CODE_LEN == LENGTH_FIELD_LEN);

/// Find the next start code at or after `from`, scanning up to `end`.
///
/// Only start offsets `i` with `i + START_CODE_LEN < end` are tried, so a
/// start code occupying exactly `[end - 4, end)` is never reported. Streams
/// whose last start code ends flush with the region carry no unit after it,
/// and that marker is left as-is.
///
/// Offsets outside `buf` yield `None` instead of panicking; callers that
/// need a hard failure validate through [`Region`](crate::Region) first.
pub fn find_start_code(buf: &[u8], from: usize, end: usize) -> Option<usize> {
    let last = end.checked_sub(START_CODE_LEN)?;
    (from..last).find(|&i| buf.get(i..i + START_CODE_LEN) == Some(&START_CODE[..]))
}
