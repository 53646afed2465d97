//! Pick id codec and pick results.
//!
//! Ids travel as 4 little-endian bytes: per vertex in the pick id buffer, as
//! the `pick_offset` uniform, and in the RGBA8 pixel the host reads back
//! from the pick target (`r` is the lowest byte).

/// Splits `id` into little-endian bytes.
#[inline]
pub const fn encode_pick_id(id: u32) -> [u8; 4] {
    id.to_le_bytes()
}

/// Inverse of [`encode_pick_id`].
#[inline]
pub const fn decode_pick_id(bytes: [u8; 4]) -> u32 {
    u32::from_le_bytes(bytes)
}

/// Decodes one RGBA8 pixel read back from the pick target.
///
/// Accepts any slice of at least 4 bytes (e.g. a row of a mapped readback
/// buffer starting at the pixel); returns `None` if it is shorter.
#[inline]
pub fn decode_pick_pixel(rgba: &[u8]) -> Option<u32> {
    let bytes: [u8; 4] = rgba.get(..4)?.try_into().ok()?;
    Some(decode_pick_id(bytes))
}

/// One resolved pick hit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickResult {
    /// Index of the interval in draw order.
    pub point_id: u32,
    /// `(x0, y0)` of that interval in data space.
    pub data_coord: [f64; 2],
}
