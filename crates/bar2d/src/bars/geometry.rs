//! Interval validation, bounds folding and vertex packing.
//!
//! Every interval `(x0, y0, x1, y1)` becomes two triangles:
//! `(x0,y0) (x0,y1) (x1,y0)` and `(x0,y1) (x1,y0) (x1,y1)`.

use crate::coords::Bounds;
use crate::error::{BarError, Result};

use super::pick::encode_pick_id;

pub const FLOATS_PER_INTERVAL: usize = 4;
pub const VERTICES_PER_BAR: usize = 6;

/// `f32`s per vertex in the positions buffer.
pub const POSITION_COMPONENTS: usize = 2;
/// Bytes per vertex in the pick id buffer.
pub const PICK_ID_BYTES: usize = 4;

/// Validates flat interval data and returns the interval count.
///
/// Rejects lengths that are not a multiple of 4, non-finite values, and
/// counts whose vertex total does not fit a `u32` draw range.
pub fn interval_count(data: &[f64]) -> Result<usize> {
    if data.len() % FLOATS_PER_INTERVAL != 0 {
        return Err(BarError::invalid(format!(
            "expected a multiple of {FLOATS_PER_INTERVAL} values, got {}",
            data.len()
        )));
    }
    if let Some(i) = data.iter().position(|v| !v.is_finite()) {
        return Err(BarError::invalid(format!(
            "non-finite value {} at index {i} (interval {})",
            data[i],
            i / FLOATS_PER_INTERVAL
        )));
    }

    let count = data.len() / FLOATS_PER_INTERVAL;
    if count.checked_mul(VERTICES_PER_BAR).is_none_or(|v| v > u32::MAX as usize) {
        return Err(BarError::invalid(format!("{count} intervals exceed the u32 vertex range")));
    }
    Ok(count)
}

#[inline]
fn intervals(data: &[f64]) -> impl Iterator<Item = (f64, f64, f64, f64)> + '_ {
    data.chunks_exact(FLOATS_PER_INTERVAL).map(|c| (c[0], c[1], c[2], c[3]))
}

/// Folds every interval into `prior`.
pub fn scan_bounds(data: &[f64], prior: Bounds) -> Bounds {
    intervals(data).fold(prior, |mut b, (x0, y0, x1, y1)| {
        b.include_interval(x0, y0, x1, y1);
        b
    })
}

/// Writes `6 * N` normalized vertices (`12 * N` floats) into `out`.
pub fn pack_positions(data: &[f64], bounds: Bounds, out: &mut [f32]) {
    let per_bar = VERTICES_PER_BAR * POSITION_COMPONENTS;
    debug_assert_eq!(out.len(), data.len() / FLOATS_PER_INTERVAL * per_bar);

    for ((x0, y0, x1, y1), dst) in intervals(data).zip(out.chunks_exact_mut(per_bar)) {
        let [nx0, ny0] = bounds.normalize(x0, y0);
        let [nx1, ny1] = bounds.normalize(x1, y1);

        dst.copy_from_slice(&[
            // triangle 1
            nx0, ny0, nx0, ny1, nx1, ny0,
            // triangle 2
            nx0, ny1, nx1, ny0, nx1, ny1,
        ]);
    }
}

/// Writes the encoded interval index for each of the 6 vertices of every bar.
pub fn pack_pick_ids(out: &mut [u8]) {
    let per_bar = VERTICES_PER_BAR * PICK_ID_BYTES;
    debug_assert_eq!(out.len() % per_bar, 0);

    for (i, dst) in out.chunks_exact_mut(per_bar).enumerate() {
        let id = encode_pick_id(i as u32);
        for v in dst.chunks_exact_mut(PICK_ID_BYTES) {
            v.copy_from_slice(&id);
        }
    }
}

/// Per-vertex weights; bars are drawn at full weight.
pub fn fill_weights(out: &mut [f32]) {
    out.fill(1.0);
}
