//! GPU seam used by bar layers.
//!
//! Layers never touch a graphics API directly. They create buffers and
//! programs through a [`GpuBackend`], upload packed bytes into them and issue
//! [`DrawCall`]s. [`WgpuBackend`] is the production implementation.
//!
//! Convention:
//! - positions are `Float32x2` in normalized bounds space (`0..1`)
//! - pick ids are `Uint8x4`, little-endian interval index
//! - weights are `Float32`
//! - every draw is a non-indexed triangle list

use std::ops::Range;

use crate::error::Result;

mod common;
pub mod wgpu_backend;

#[cfg(test)]
pub(crate) mod recording;

pub use common::BarUniforms;
pub use wgpu_backend::{RenderTarget, WgpuBackend, WgpuBuffer, WgpuProgram};

/// What a vertex buffer holds; decides its vertex layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Positions,
    PickIds,
    Weights,
}

impl BufferKind {
    /// Bytes per vertex.
    pub const fn stride(self) -> u64 {
        match self {
            BufferKind::Positions => 8,
            BufferKind::PickIds => 4,
            BufferKind::Weights => 4,
        }
    }
}

/// Which shader program to build.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ProgramKind {
    /// Colored bars.
    Draw,
    /// Encoded ids for the pick pass.
    Pick,
}

/// One triangle-list draw.
///
/// `weights` is read by [`ProgramKind::Draw`], `pick_ids` by
/// [`ProgramKind::Pick`]; the other one is ignored.
pub struct DrawCall<'a, B: GpuBackend + ?Sized> {
    pub program: &'a B::Program,
    pub positions: &'a B::Buffer,
    pub weights: Option<&'a B::Buffer>,
    pub pick_ids: Option<&'a B::Buffer>,
    pub uniforms: BarUniforms,
    pub vertices: Range<u32>,
}

/// Buffer and program lifecycle plus drawing, as seen by a layer.
pub trait GpuBackend {
    type Buffer;
    type Program;

    fn create_buffer(&mut self, kind: BufferKind) -> Result<Self::Buffer>;

    /// Replaces the whole buffer contents.
    fn update_buffer(&mut self, buffer: &mut Self::Buffer, contents: &[u8]) -> Result<()>;

    fn dispose_buffer(&mut self, buffer: Self::Buffer);

    fn create_program(&mut self, kind: ProgramKind) -> Result<Self::Program>;

    fn dispose_program(&mut self, program: Self::Program);

    fn draw(&mut self, call: DrawCall<'_, Self>) -> Result<()>;
}
