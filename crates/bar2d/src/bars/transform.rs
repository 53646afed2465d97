//! Bounds-space to clip-space transform and uniform assembly.

use bytemuck::Zeroable;

use crate::coords::Bounds;
use crate::gpu::BarUniforms;
use crate::paint::Color;
use crate::plot::PlotView;

use super::pick::encode_pick_id;

/// `center_fraction` value telling the shader there is no border band.
pub const NO_BORDER: f32 = 2.0;

/// Extra width, in pixels, added to the border band for antialiasing.
const BORDER_AA: f32 = 1.25;

/// Resolved style of a layer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BarStyle {
    pub size: f32,
    pub color: Color,
    pub border_size: f32,
    pub border_color: Color,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self { size: 12.0, color: Color::red(), border_size: 1.0, border_color: Color::black() }
    }
}

#[inline]
fn ratio(num: f64, den: f64) -> f64 {
    if den != 0.0 && den.is_finite() { num / den } else { 0.0 }
}

/// Column-major 3x3 matrix mapping a layer's unit bounds space into the clip
/// space of `data_box`.
///
/// ```text
/// | sx  0  tx |      sx = 2 * bounds_w / data_w
/// |  0 sy  ty |      tx = 2 * (bounds.lo_x - data.lo_x) / data_w - 1
/// |  0  0   1 |
/// ```
///
/// Empty bounds or a zero-size data box collapse the scale to `0`.
pub fn bounds_to_clip(bounds: Bounds, data_box: Bounds) -> [f32; 9] {
    let (bw, bh) = if bounds.is_empty() { (0.0, 0.0) } else { (bounds.width(), bounds.height()) };
    let (lo_x, lo_y) = if bounds.is_empty() { (data_box.lo_x, data_box.lo_y) } else { (bounds.lo_x, bounds.lo_y) };
    let (dw, dh) = (data_box.width(), data_box.height());

    let sx = 2.0 * ratio(bw, dw);
    let sy = 2.0 * ratio(bh, dh);
    let tx = 2.0 * ratio(lo_x - data_box.lo_x, dw) - 1.0;
    let ty = 2.0 * ratio(lo_y - data_box.lo_y, dh) - 1.0;

    [
        sx as f32, 0.0, 0.0, //
        0.0, sy as f32, 0.0, //
        tx as f32, ty as f32, 1.0,
    ]
}

/// Fraction of the half-extent filled with `color` before the border band.
pub fn center_fraction(size: f32, border_size: f32) -> f32 {
    if border_size > 0.0 {
        size / (size + border_size + BORDER_AA)
    } else {
        NO_BORDER
    }
}

/// Total marker width in device pixels.
pub fn point_size(pixel_ratio: f32, size: f32, border_size: f32) -> f32 {
    pixel_ratio * (size + border_size)
}

fn base_uniforms(style: &BarStyle, bounds: Bounds, data_box: Bounds, pixel_ratio: f32) -> BarUniforms {
    BarUniforms {
        matrix: BarUniforms::pack_matrix(bounds_to_clip(bounds, data_box)),
        color: style.color.to_array(),
        border_color: style.border_color.to_array(),
        point_size: point_size(pixel_ratio, style.size, style.border_size),
        center_fraction: center_fraction(style.size, style.border_size),
        ..BarUniforms::zeroed()
    }
}

/// Uniforms for the color pass.
pub fn draw_uniforms(style: &BarStyle, bounds: Bounds, view: &PlotView) -> BarUniforms {
    BarUniforms {
        use_weight: 1,
        ..base_uniforms(style, bounds, view.data_box, view.pixel_ratio)
    }
}

/// Uniforms for the pick pass; ids are offset by `pick_offset` on the GPU.
pub fn pick_uniforms(style: &BarStyle, bounds: Bounds, view: &PlotView, pick_offset: u32) -> BarUniforms {
    BarUniforms {
        pick_offset: encode_pick_id(pick_offset).map(u32::from),
        ..base_uniforms(style, bounds, view.data_box, view.pick_pixel_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(m: [f32; 9], x: f32, y: f32) -> (f32, f32) {
        (m[0] * x + m[3] * y + m[6], m[1] * x + m[4] * y + m[7])
    }

    fn style(size: f32, border_size: f32) -> BarStyle {
        BarStyle { size, color: Color::red(), border_size, border_color: Color::black() }
    }

    // ── matrix ────────────────────────────────────────────────────────────

    #[test]
    fn matching_boxes_map_to_full_clip_range() {
        let b = Bounds::new(0.0, 0.0, 1.0, 1.0);
        let m = bounds_to_clip(b, b);
        assert_eq!(m, [2.0, 0.0, 0.0, 0.0, 2.0, 0.0, -1.0, -1.0, 1.0]);
        assert_eq!(apply(m, 0.0, 0.0), (-1.0, -1.0));
        assert_eq!(apply(m, 1.0, 1.0), (1.0, 1.0));
    }

    #[test]
    fn bounds_inside_larger_data_box() {
        let m = bounds_to_clip(Bounds::new(2.0, 0.0, 4.0, 10.0), Bounds::new(0.0, 0.0, 4.0, 20.0));
        // x: 2..4 of 0..4 -> 0..1 ; y: 0..10 of 0..20 -> -1..0
        assert_eq!(apply(m, 0.0, 0.0), (0.0, -1.0));
        assert_eq!(apply(m, 1.0, 1.0), (1.0, 0.0));
    }

    #[test]
    fn degenerate_data_box_does_not_produce_nan() {
        let m = bounds_to_clip(Bounds::new(0.0, 0.0, 1.0, 1.0), Bounds::new(0.0, 0.0, 0.0, 0.0));
        assert!(m.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn empty_bounds_collapse_scale() {
        let m = bounds_to_clip(Bounds::EMPTY, Bounds::new(0.0, 0.0, 1.0, 1.0));
        assert!(m.iter().all(|v| v.is_finite()));
        assert_eq!((m[0], m[4]), (0.0, 0.0));
    }

    // ── style terms ───────────────────────────────────────────────────────

    #[test]
    fn center_fraction_with_border() {
        assert_eq!(center_fraction(12.0, 1.0), 12.0 / 14.25);
    }

    #[test]
    fn center_fraction_without_border_is_sentinel() {
        assert_eq!(center_fraction(12.0, 0.0), NO_BORDER);
    }

    #[test]
    fn point_size_scales_by_pixel_ratio() {
        assert_eq!(point_size(2.0, 12.0, 1.0), 26.0);
    }

    // ── uniforms ──────────────────────────────────────────────────────────

    #[test]
    fn draw_uniforms_use_display_ratio_and_weights() {
        let view = PlotView { pixel_ratio: 2.0, pick_pixel_ratio: 1.0, ..PlotView::default() };
        let u = draw_uniforms(&style(12.0, 1.0), Bounds::new(0.0, 0.0, 1.0, 1.0), &view);
        assert_eq!(u.point_size, 26.0);
        assert_eq!(u.use_weight, 1);
        assert_eq!(u.pick_offset, [0; 4]);
        assert_eq!(u.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(u.border_color, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn pick_uniforms_carry_offset_bytes_and_pick_ratio() {
        let view = PlotView { pixel_ratio: 2.0, pick_pixel_ratio: 0.5, ..PlotView::default() };
        let u = pick_uniforms(&style(10.0, 0.0), Bounds::new(0.0, 0.0, 1.0, 1.0), &view, 0x0001_0203);
        assert_eq!(u.pick_offset, [3, 2, 1, 0]);
        assert_eq!(u.point_size, 5.0);
        assert_eq!(u.center_fraction, NO_BORDER);
        assert_eq!(u.use_weight, 0);
    }
}
