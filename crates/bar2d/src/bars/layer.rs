use std::any::Any;

use crate::coords::Bounds;
use crate::error::{BarError, Result};
use crate::gpu::{BufferKind, DrawCall, GpuBackend, ProgramKind};
use crate::plot::{ObjectId, Plot, PlotObject, PlotView};
use crate::scratch::ScratchPool;

use super::geometry::{self, PICK_ID_BYTES, POSITION_COMPONENTS, VERTICES_PER_BAR};
use super::options::{BarOptions, BoundsPolicy};
use super::pick::PickResult;
use super::transform::{self, BarStyle};

/// Bar chart layer.
///
/// Owns three vertex buffers (positions, pick ids, weights) and two programs
/// (draw, pick). Geometry is rebuilt wholesale by [`update`](Self::update);
/// positions are stored normalized to [`bounds`](Self::bounds) and mapped to
/// the host's data box at draw time.
#[derive(Debug)]
pub struct BarLayer<B: GpuBackend> {
    positions: B::Buffer,
    pick_ids: B::Buffer,
    weights: B::Buffer,
    program: B::Program,
    pick_program: B::Program,

    style: BarStyle,
    bounds: Bounds,

    /// Interval data as passed in, kept for pick resolution.
    points: Vec<f64>,
    interval_count: u32,
    pick_offset: u32,

    scratch_f32: ScratchPool<f32>,
    scratch_u8: ScratchPool<u8>,
}

struct Resources<B: GpuBackend> {
    positions: B::Buffer,
    pick_ids: B::Buffer,
    weights: B::Buffer,
    program: B::Program,
    pick_program: B::Program,
}

impl<B: GpuBackend> Resources<B> {
    /// Creates everything or nothing: on failure, already created resources are disposed.
    fn create(gpu: &mut B) -> Result<Self> {
        let program = gpu.create_program(ProgramKind::Draw)?;
        let pick_program = match gpu.create_program(ProgramKind::Pick) {
            Ok(p) => p,
            Err(e) => {
                gpu.dispose_program(program);
                return Err(e);
            }
        };

        let mut buffers = Vec::with_capacity(3);
        for kind in [BufferKind::Positions, BufferKind::PickIds, BufferKind::Weights] {
            match gpu.create_buffer(kind) {
                Ok(b) => buffers.push(b),
                Err(e) => {
                    for b in buffers {
                        gpu.dispose_buffer(b);
                    }
                    gpu.dispose_program(program);
                    gpu.dispose_program(pick_program);
                    return Err(e);
                }
            }
        }

        let mut buffers = buffers.into_iter();
        match (buffers.next(), buffers.next(), buffers.next()) {
            (Some(positions), Some(pick_ids), Some(weights)) => {
                Ok(Self { positions, pick_ids, weights, program, pick_program })
            }
            _ => Err(BarError::backend("bar layer buffers were not all created")),
        }
    }
}

impl<B: GpuBackend> BarLayer<B> {
    /// Allocates GPU resources and applies `options`.
    pub fn new(gpu: &mut B, options: BarOptions) -> Result<Self> {
        let Resources { positions, pick_ids, weights, program, pick_program } = Resources::create(gpu)?;

        let mut layer = Self {
            positions,
            pick_ids,
            weights,
            program,
            pick_program,
            style: BarStyle::default(),
            bounds: Bounds::EMPTY,
            points: Vec::new(),
            interval_count: 0,
            pick_offset: 0,
            scratch_f32: ScratchPool::new(),
            scratch_u8: ScratchPool::new(),
        };

        if let Err(e) = layer.update(gpu, options) {
            layer.dispose(gpu);
            return Err(e);
        }
        Ok(layer)
    }

    /// Builds a layer and registers it with `plot`.
    pub fn create(plot: &mut Plot<B>, gpu: &mut B, options: BarOptions) -> Result<ObjectId>
    where
        B: 'static,
    {
        let layer = Self::new(gpu, options)?;
        Ok(plot.add_object(Box::new(layer)))
    }

    /// Rebuilds geometry, bounds and style from `options`.
    ///
    /// Invalid data fails with [`BarError::InvalidInput`] before anything is
    /// touched. A backend failure during upload leaves the layer with zero
    /// intervals so later draws are no-ops.
    pub fn update(&mut self, gpu: &mut B, options: BarOptions) -> Result<()> {
        let BarOptions { positions: data, size, color, border_size, border_color, bounds_policy } = options;

        let count = geometry::interval_count(&data)?;

        let prior = match bounds_policy {
            BoundsPolicy::Accumulate => self.bounds,
            BoundsPolicy::Reset => Bounds::EMPTY,
        };
        let bounds = geometry::scan_bounds(&data, prior);

        let vertex_count = count * VERTICES_PER_BAR;
        if let Err(e) = self.upload(gpu, &data, bounds, vertex_count) {
            self.interval_count = 0;
            self.points.clear();
            return Err(e);
        }

        self.style = BarStyle { size, color, border_size, border_color };
        self.bounds = bounds;
        self.points = data;
        // interval_count() validated the u32 range.
        self.interval_count = count as u32;
        self.pick_offset = 0;

        log::debug!(
            "bar layer: {count} intervals, bounds {:?}, {} cached scratch arrays",
            bounds.to_array(),
            self.scratch_f32.cached() + self.scratch_u8.cached()
        );
        Ok(())
    }

    fn upload(&mut self, gpu: &mut B, data: &[f64], bounds: Bounds, vertex_count: usize) -> Result<()> {
        let Self { positions, pick_ids, weights, scratch_f32, scratch_u8, .. } = self;

        let mut packed = scratch_f32.acquire(vertex_count * POSITION_COMPONENTS);
        let mut packed_ids = scratch_u8.acquire(vertex_count * PICK_ID_BYTES);
        let mut packed_w = scratch_f32.acquire(vertex_count);

        geometry::pack_positions(data, bounds, &mut packed);
        geometry::pack_pick_ids(&mut packed_ids);
        geometry::fill_weights(&mut packed_w);

        gpu.update_buffer(positions, bytemuck::cast_slice(&packed))?;
        gpu.update_buffer(pick_ids, &packed_ids)?;
        gpu.update_buffer(weights, bytemuck::cast_slice(&packed_w))?;
        Ok(())
    }

    /// Drops every accumulated extent; the next update computes bounds from its own data.
    pub fn reset_bounds(&mut self) {
        self.bounds = Bounds::EMPTY;
    }

    /// Issues one triangle-list draw of `6 * N` vertices; nothing when `N == 0`.
    pub fn draw(&self, view: &PlotView, gpu: &mut B) -> Result<()> {
        if self.interval_count == 0 {
            return Ok(());
        }

        let uniforms = transform::draw_uniforms(&self.style, self.bounds, view);
        log::trace!("bar layer: draw {} vertices", self.vertex_count());

        gpu.draw(DrawCall {
            program: &self.program,
            positions: &self.positions,
            weights: Some(&self.weights),
            pick_ids: None,
            uniforms,
            vertices: 0..self.vertex_count(),
        })
    }

    /// Draws encoded ids starting at `pick_offset` and returns `pick_offset + N`.
    ///
    /// With no intervals nothing is drawn and `pick_offset` is returned as is.
    pub fn draw_pick(&mut self, view: &PlotView, gpu: &mut B, pick_offset: u32) -> Result<u32> {
        if self.interval_count == 0 {
            return Ok(pick_offset);
        }

        let next = pick_offset
            .checked_add(self.interval_count)
            .ok_or(BarError::PickOverflow { offset: pick_offset, count: self.interval_count })?;

        self.pick_offset = pick_offset;
        let uniforms = transform::pick_uniforms(&self.style, self.bounds, view, pick_offset);
        log::trace!("bar layer: pick draw ids {pick_offset}..{next}");

        gpu.draw(DrawCall {
            program: &self.pick_program,
            positions: &self.positions,
            weights: None,
            pick_ids: Some(&self.pick_ids),
            uniforms,
            vertices: 0..self.vertex_count(),
        })?;
        Ok(next)
    }

    /// Resolves a decoded pick value to the interval it encodes.
    ///
    /// Screen coordinates are accepted for host symmetry; resolution only
    /// depends on `value` and the offset of the last [`draw_pick`](Self::draw_pick).
    pub fn pick(&self, _x: f64, _y: f64, value: u32) -> Option<PickResult> {
        let point_id = value.checked_sub(self.pick_offset)?;
        if point_id >= self.interval_count {
            return None;
        }
        let base = point_id as usize * geometry::FLOATS_PER_INTERVAL;
        let coords = self.points.get(base..base + 2)?;
        Some(PickResult { point_id, data_coord: [coords[0], coords[1]] })
    }

    /// Releases both programs and all three buffers.
    pub fn dispose(self, gpu: &mut B) {
        log::debug!("bar layer: dispose ({} intervals)", self.interval_count);
        gpu.dispose_program(self.program);
        gpu.dispose_program(self.pick_program);
        gpu.dispose_buffer(self.positions);
        gpu.dispose_buffer(self.pick_ids);
        gpu.dispose_buffer(self.weights);
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn interval_count(&self) -> u32 {
        self.interval_count
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.interval_count * VERTICES_PER_BAR as u32
    }

    #[inline]
    pub fn pick_offset(&self) -> u32 {
        self.pick_offset
    }

    #[inline]
    pub fn style(&self) -> &BarStyle {
        &self.style
    }

    /// Interval data from the last successful update.
    #[inline]
    pub fn points(&self) -> &[f64] {
        &self.points
    }
}

impl<B: GpuBackend + 'static> PlotObject<B> for BarLayer<B> {
    fn draw(&self, view: &PlotView, gpu: &mut B) -> Result<()> {
        BarLayer::draw(self, view, gpu)
    }

    fn draw_pick(&mut self, view: &PlotView, gpu: &mut B, pick_offset: u32) -> Result<u32> {
        BarLayer::draw_pick(self, view, gpu, pick_offset)
    }

    fn pick(&self, x: f64, y: f64, value: u32) -> Option<PickResult> {
        BarLayer::pick(self, x, y, value)
    }

    fn dispose(self: Box<Self>, gpu: &mut B) {
        BarLayer::dispose(*self, gpu)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::recording::RecordingBackend;
    use crate::paint::Color;

    fn layer(gpu: &mut RecordingBackend, data: &[f64]) -> BarLayer<RecordingBackend> {
        BarLayer::new(gpu, BarOptions::new(data.to_vec())).unwrap()
    }

    fn view() -> PlotView {
        PlotView { data_box: Bounds::new(0.0, 0.0, 10.0, 10.0), ..PlotView::default() }
    }

    // ── update / draw ─────────────────────────────────────────────────────

    #[test]
    fn unit_square_example() {
        let mut gpu = RecordingBackend::new();
        let bars = layer(&mut gpu, &[0.0, 0.0, 1.0, 1.0]);

        assert_eq!(bars.bounds(), Bounds::new(0.0, 0.0, 1.0, 1.0));
        let corners = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
        let verts = gpu.positions();
        assert_eq!(verts.len(), 6);
        assert!(verts.iter().all(|v| corners.contains(v)));
        assert_eq!(&verts[..3], &[[0.0, 0.0], [0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(&verts[3..], &[[0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]);

        let hit = bars.pick(0.0, 0.0, 0).unwrap();
        assert_eq!(hit, PickResult { point_id: 0, data_coord: [0.0, 0.0] });
    }

    #[test]
    fn draw_issues_one_call_of_six_vertices_per_bar() {
        let mut gpu = RecordingBackend::new();
        let data: Vec<f64> = (0..5).flat_map(|i| [i as f64, 0.0, i as f64 + 0.8, 1.0 + i as f64]).collect();
        let bars = layer(&mut gpu, &data);

        bars.draw(&view(), &mut gpu).unwrap();
        assert_eq!(gpu.draws.len(), 1);
        let d = &gpu.draws[0];
        assert_eq!(d.program, ProgramKind::Draw);
        assert_eq!(d.vertices, 0..30);
        assert!(d.attribute.is_some());
        assert_eq!(d.uniforms.use_weight, 1);
        assert_eq!(gpu.contents(BufferKind::Weights, 0).len(), 30 * 4);
        assert_eq!(gpu.contents(BufferKind::PickIds, 0).len(), 30 * 4);
    }

    #[test]
    fn empty_input_draws_nothing() {
        let mut gpu = RecordingBackend::new();
        let mut bars = layer(&mut gpu, &[]);

        assert_eq!(bars.interval_count(), 0);
        bars.draw(&view(), &mut gpu).unwrap();
        assert_eq!(bars.draw_pick(&view(), &mut gpu, 7).unwrap(), 7);
        assert!(gpu.draws.is_empty());
        assert!(gpu.positions().is_empty());
    }

    #[test]
    fn ragged_input_is_rejected_and_state_kept() {
        let mut gpu = RecordingBackend::new();
        let mut bars = layer(&mut gpu, &[0.0, 0.0, 2.0, 2.0]);
        let uploads = gpu.uploads;

        let err = bars.update(&mut gpu, BarOptions::new(vec![1.0, 2.0, 3.0])).unwrap_err();
        assert!(matches!(err, BarError::InvalidInput(_)));
        assert_eq!(gpu.uploads, uploads);
        assert_eq!(bars.interval_count(), 1);
        assert_eq!(bars.bounds(), Bounds::new(0.0, 0.0, 2.0, 2.0));
    }

    #[test]
    fn style_and_uniforms_follow_options() {
        let mut gpu = RecordingBackend::new();
        let opts = BarOptions::new(vec![0.0, 0.0, 1.0, 1.0])
            .size(8.0)
            .border_size(0.0)
            .color([0.0, 0.0, 1.0, 1.0])
            .border_color([1.0, 1.0, 1.0, 1.0]);
        let bars = BarLayer::new(&mut gpu, opts).unwrap();

        let v = PlotView { pixel_ratio: 2.0, ..view() };
        bars.draw(&v, &mut gpu).unwrap();
        let u = gpu.draws[0].uniforms;
        assert_eq!(u.point_size, 16.0);
        assert_eq!(u.center_fraction, transform::NO_BORDER);
        assert_eq!(u.color, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(u.border_color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(bars.style().color, Color::new(0.0, 0.0, 1.0, 1.0));
        // unit bounds inside a 10x10 data box
        assert_eq!(u.matrix3(), [0.2, 0.0, 0.0, 0.0, 0.2, 0.0, -1.0, -1.0, 1.0]);
    }

    #[test]
    fn update_twice_is_idempotent() {
        let mut gpu = RecordingBackend::new();
        let data = vec![0.0, 1.0, 0.5, 3.0, 1.0, 0.0, 1.5, 2.0];
        let mut bars = layer(&mut gpu, &data);
        let first = gpu.positions();

        bars.update(&mut gpu, BarOptions::new(data)).unwrap();
        assert_eq!(gpu.positions(), first);
    }

    #[test]
    fn scratch_is_released_after_update() {
        let mut gpu = RecordingBackend::new();
        let mut bars = layer(&mut gpu, &[0.0, 0.0, 1.0, 1.0]);
        assert_eq!(bars.scratch_f32.outstanding(), 0);
        assert_eq!(bars.scratch_u8.outstanding(), 0);

        assert!(bars.update(&mut gpu, BarOptions::new(vec![0.0])).is_err());
        assert_eq!(bars.scratch_f32.outstanding(), 0);
        assert_eq!(bars.scratch_u8.outstanding(), 0);
    }

    // ── bounds policy ─────────────────────────────────────────────────────

    #[test]
    fn bounds_accumulate_by_default() {
        let mut gpu = RecordingBackend::new();
        let mut bars = layer(&mut gpu, &[0.0, 0.0, 4.0, 4.0]);

        bars.update(&mut gpu, BarOptions::new(vec![1.0, 1.0, 2.0, 2.0])).unwrap();
        assert_eq!(bars.bounds(), Bounds::new(0.0, 0.0, 4.0, 4.0));
        assert_eq!(gpu.positions()[0], [0.25, 0.25]);
    }

    #[test]
    fn reset_policy_recomputes_bounds() {
        let mut gpu = RecordingBackend::new();
        let mut bars = layer(&mut gpu, &[0.0, 0.0, 4.0, 4.0]);

        let opts = BarOptions::new(vec![1.0, 1.0, 2.0, 2.0]).bounds_policy(BoundsPolicy::Reset);
        bars.update(&mut gpu, opts).unwrap();
        assert_eq!(bars.bounds(), Bounds::new(1.0, 1.0, 2.0, 2.0));
        assert_eq!(gpu.positions()[0], [0.0, 0.0]);
    }

    #[test]
    fn reset_bounds_clears_accumulation() {
        let mut gpu = RecordingBackend::new();
        let mut bars = layer(&mut gpu, &[0.0, 0.0, 4.0, 4.0]);

        bars.reset_bounds();
        assert!(bars.bounds().is_empty());
        bars.update(&mut gpu, BarOptions::new(vec![1.0, 1.0, 2.0, 2.0])).unwrap();
        assert_eq!(bars.bounds(), Bounds::new(1.0, 1.0, 2.0, 2.0));
    }

    // ── pick ──────────────────────────────────────────────────────────────

    #[test]
    fn draw_pick_returns_next_offset_and_uploads_offset_bytes() {
        let mut gpu = RecordingBackend::new();
        let mut bars = layer(&mut gpu, &[0.0; 12]);

        assert_eq!(bars.draw_pick(&view(), &mut gpu, 300).unwrap(), 303);
        assert_eq!(bars.pick_offset(), 300);
        let d = &gpu.draws[0];
        assert_eq!(d.program, ProgramKind::Pick);
        assert_eq!(d.vertices, 0..18);
        assert_eq!(d.uniforms.pick_offset, [44, 1, 0, 0]);
    }

    #[test]
    fn pick_resolves_each_interval_in_range() {
        let mut gpu = RecordingBackend::new();
        let data = [1.0, 2.0, 3.0, 4.0, -1.0, -2.0, 0.0, 0.0, 5.5, 6.5, 7.0, 8.0];
        let mut bars = layer(&mut gpu, &data);
        bars.draw_pick(&view(), &mut gpu, 10).unwrap();

        for i in 0..3u32 {
            let hit = bars.pick(0.0, 0.0, 10 + i).unwrap();
            let base = i as usize * 4;
            assert_eq!(hit.point_id, i);
            assert_eq!(hit.data_coord, [data[base], data[base + 1]]);
        }
        assert_eq!(bars.pick(0.0, 0.0, 9), None);
        assert_eq!(bars.pick(0.0, 0.0, 13), None);
        assert_eq!(bars.pick(0.0, 0.0, u32::MAX), None);
    }

    #[test]
    fn chained_layers_have_disjoint_ranges() {
        let mut gpu = RecordingBackend::new();
        let mut a = layer(&mut gpu, &[0.0; 8]);
        let mut b = layer(&mut gpu, &[0.0; 12]);

        let next = a.draw_pick(&view(), &mut gpu, 0).unwrap();
        assert_eq!(next, 2);
        assert_eq!(b.draw_pick(&view(), &mut gpu, next).unwrap(), 5);

        for v in 0..5 {
            assert!(a.pick(0.0, 0.0, v).is_some() ^ b.pick(0.0, 0.0, v).is_some(), "id {v}");
        }
    }

    #[test]
    fn pick_offset_overflow_is_reported() {
        let mut gpu = RecordingBackend::new();
        let mut bars = layer(&mut gpu, &[0.0; 8]);

        let err = bars.draw_pick(&view(), &mut gpu, u32::MAX - 1).unwrap_err();
        assert_eq!(err, BarError::PickOverflow { offset: u32::MAX - 1, count: 2 });
        assert!(gpu.draws.is_empty());
    }

    #[test]
    fn update_resets_pick_offset() {
        let mut gpu = RecordingBackend::new();
        let mut bars = layer(&mut gpu, &[0.0; 4]);
        bars.draw_pick(&view(), &mut gpu, 50).unwrap();

        bars.update(&mut gpu, BarOptions::new(vec![0.0; 4])).unwrap();
        assert_eq!(bars.pick_offset(), 0);
        assert!(bars.pick(0.0, 0.0, 0).is_some());
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn dispose_releases_all_resources() {
        let mut gpu = RecordingBackend::new();
        let bars = layer(&mut gpu, &[0.0, 0.0, 1.0, 1.0]);
        assert_eq!(gpu.live_buffers(), 3);
        assert_eq!(gpu.live_programs(), 2);

        bars.dispose(&mut gpu);
        assert_eq!(gpu.live_buffers(), 0);
        assert_eq!(gpu.live_programs(), 0);
    }

    #[test]
    fn failed_construction_leaks_nothing() {
        let mut gpu = RecordingBackend::new();
        assert!(BarLayer::new(&mut gpu, BarOptions::new(vec![f64::NAN; 4])).is_err());
        assert_eq!(gpu.live_buffers(), 0);
        assert_eq!(gpu.live_programs(), 0);
    }

    #[test]
    fn failed_resource_creation_rolls_back() {
        // 2 programs + 3 buffers
        for failing in 0..5 {
            let mut gpu = RecordingBackend::new();
            gpu.fail_on_create = Some(failing);
            let err = BarLayer::new(&mut gpu, BarOptions::new(vec![0.0, 0.0, 1.0, 1.0])).unwrap_err();
            assert!(matches!(err, BarError::Backend(_)), "create #{failing}: {err}");
            assert_eq!(gpu.live_buffers(), 0, "create #{failing}");
            assert_eq!(gpu.live_programs(), 0, "create #{failing}");
        }
    }

    #[test]
    fn failed_first_upload_disposes_new_layer() {
        let mut gpu = RecordingBackend::new();
        gpu.fail_on_upload = Some(0);
        assert!(BarLayer::new(&mut gpu, BarOptions::new(vec![0.0, 0.0, 1.0, 1.0])).is_err());
        assert_eq!(gpu.live_buffers(), 0);
        assert_eq!(gpu.live_programs(), 0);
    }

    #[test]
    fn failed_upload_leaves_layer_empty() {
        let mut gpu = RecordingBackend::new();
        let mut bars = layer(&mut gpu, &[0.0, 0.0, 1.0, 1.0, 2.0, 0.0, 3.0, 2.0]);
        assert_eq!(bars.interval_count(), 2);

        // positions go through, pick ids fail
        gpu.fail_on_upload = Some(gpu.upload_calls() + 1);
        let err = bars.update(&mut gpu, BarOptions::new(vec![0.0, 0.0, 4.0, 4.0])).unwrap_err();
        assert!(matches!(err, BarError::Backend(_)), "{err}");

        assert_eq!(bars.interval_count(), 0);
        assert!(bars.points().is_empty());
        assert_eq!(bars.scratch_f32.outstanding(), 0);
        assert_eq!(bars.scratch_u8.outstanding(), 0);

        bars.draw(&view(), &mut gpu).unwrap();
        assert_eq!(bars.draw_pick(&view(), &mut gpu, 4).unwrap(), 4);
        assert!(gpu.draws.is_empty());
        assert_eq!(bars.pick(0.0, 0.0, 4), None);

        // a later successful update recovers
        bars.update(&mut gpu, BarOptions::new(vec![0.0, 0.0, 4.0, 4.0])).unwrap();
        assert_eq!(bars.interval_count(), 1);
    }

    // ── reversed intervals ────────────────────────────────────────────────

    #[test]
    fn downward_bar_is_normalized_and_drawn() {
        let mut gpu = RecordingBackend::new();
        let bars = layer(&mut gpu, &[0.0, 0.0, 1.0, -5.0]);

        assert_eq!(bars.bounds(), Bounds::new(0.0, -5.0, 1.0, 0.0));
        assert!(!bars.bounds().is_empty());
        let verts = gpu.positions();
        assert_eq!(&verts[..3], &[[0.0, 1.0], [0.0, 0.0], [1.0, 1.0]]);

        let v = PlotView { data_box: Bounds::new(0.0, -10.0, 2.0, 0.0), ..PlotView::default() };
        bars.draw(&v, &mut gpu).unwrap();
        let m = gpu.draws[0].uniforms.matrix3();
        assert_eq!((m[0], m[4]), (1.0, 1.0));
        assert_eq!((m[6], m[7]), (-1.0, 0.0));
    }

    #[test]
    fn mixed_direction_bars_stay_in_unit_range() {
        let mut gpu = RecordingBackend::new();
        let _bars = layer(&mut gpu, &[0.0, 0.0, 1.0, 5.0, 1.0, 0.0, 2.0, -5.0, 4.0, 1.0, 3.0, 2.0]);

        let verts = gpu.positions();
        assert_eq!(verts.len(), 18);
        assert!(verts.iter().flatten().all(|c| (0.0..=1.0).contains(c)), "{verts:?}");
        // second bar's bottom edge sits at the low end of y
        assert!(verts[6..12].contains(&[0.5, 0.0]));
    }
}
