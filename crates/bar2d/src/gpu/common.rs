//! Shared GPU types: uniform block, vertex layouts, blend state.

use bytemuck::{Pod, Zeroable};

use super::BufferKind;

// ── uniforms ──────────────────────────────────────────────────────────────

/// Uniform block shared by the draw and pick programs.
///
/// Layout matches `Uniforms` in `bar.wgsl` / `bar_pick.wgsl` (112 bytes):
/// `mat3x3<f32>` occupies three 16-byte columns.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct BarUniforms {
    /// Column-major 3x3 affine transform; the 4th lane of each column is padding.
    pub matrix: [[f32; 4]; 3],
    pub color: [f32; 4],
    pub border_color: [f32; 4],
    /// Little-endian bytes of the layer's pick offset, one per lane.
    pub pick_offset: [u32; 4],
    pub point_size: f32,
    pub center_fraction: f32,
    pub use_weight: u32,
    pub _pad: u32,
}

impl BarUniforms {
    /// Packs a column-major `[f32; 9]` matrix into the padded column layout.
    pub fn pack_matrix(m: [f32; 9]) -> [[f32; 4]; 3] {
        [
            [m[0], m[1], m[2], 0.0],
            [m[3], m[4], m[5], 0.0],
            [m[6], m[7], m[8], 0.0],
        ]
    }

    /// Column-major `[f32; 9]` view of [`matrix`](Self::matrix).
    pub fn matrix3(&self) -> [f32; 9] {
        let [c0, c1, c2] = self.matrix;
        [c0[0], c0[1], c0[2], c1[0], c1[1], c1[2], c2[0], c2[1], c2[2]]
    }
}

// ── vertex layouts ────────────────────────────────────────────────────────

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const PICK_ID_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Uint8x4];
const WEIGHT_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32];

pub(super) fn vertex_layout(kind: BufferKind) -> wgpu::VertexBufferLayout<'static> {
    let attributes: &'static [wgpu::VertexAttribute] = match kind {
        BufferKind::Positions => &POSITION_ATTRS,
        BufferKind::PickIds => &PICK_ID_ATTRS,
        BufferKind::Weights => &WEIGHT_ATTRS,
    };
    wgpu::VertexBufferLayout {
        array_stride: kind.stride(),
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    }
}

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

/// Minimum binding size for the uniform block; non-zero by construction.
pub(super) fn uniforms_min_binding_size() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<BarUniforms>() as u64)
}
