//! In-memory [`GpuBackend`] that records everything a layer does.

use std::ops::Range;

use crate::error::{BarError, Result};

use super::{BarUniforms, BufferKind, DrawCall, GpuBackend, ProgramKind};

#[derive(Debug)]
pub(crate) struct RecBuffer {
    pub id: usize,
}

#[derive(Debug)]
pub(crate) struct RecProgram {
    pub id: usize,
    pub kind: ProgramKind,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedDraw {
    pub program: ProgramKind,
    pub uniforms: BarUniforms,
    pub vertices: Range<u32>,
    pub positions: usize,
    pub attribute: Option<usize>,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    next_id: usize,
    /// Latest contents per buffer id; `None` once disposed.
    pub buffers: Vec<Option<(BufferKind, Vec<u8>)>>,
    pub programs: Vec<Option<ProgramKind>>,
    pub draws: Vec<RecordedDraw>,
    pub uploads: usize,

    /// Fails the create call (buffers and programs, 0-based) with this index.
    pub fail_on_create: Option<usize>,
    /// Fails the upload call (0-based, counted across all buffers) with this index.
    pub fail_on_upload: Option<usize>,
    create_calls: usize,
    upload_calls: usize,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.iter().flatten().count()
    }

    pub fn live_programs(&self) -> usize {
        self.programs.iter().flatten().count()
    }

    /// Latest bytes uploaded to the live buffer of `kind` created `nth` (0-based).
    pub fn contents(&self, kind: BufferKind, nth: usize) -> &[u8] {
        self.buffers
            .iter()
            .flatten()
            .filter(|(k, _)| *k == kind)
            .nth(nth)
            .map(|(_, bytes)| bytes.as_slice())
            .unwrap_or(&[])
    }

    /// Positions of the first live positions buffer as `f32` pairs.
    pub fn positions(&self) -> Vec<[f32; 2]> {
        bytemuck::pod_collect_to_vec(self.contents(BufferKind::Positions, 0))
    }

    /// Upload calls seen so far, failed ones included.
    pub fn upload_calls(&self) -> usize {
        self.upload_calls
    }

    fn check_create(&mut self) -> Result<()> {
        let call = self.create_calls;
        self.create_calls += 1;
        if self.fail_on_create == Some(call) {
            return Err(BarError::backend(format!("injected failure on create #{call}")));
        }
        Ok(())
    }

    fn alloc_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl GpuBackend for RecordingBackend {
    type Buffer = RecBuffer;
    type Program = RecProgram;

    fn create_buffer(&mut self, kind: BufferKind) -> Result<RecBuffer> {
        self.check_create()?;
        let id = self.alloc_id();
        if self.buffers.len() <= id {
            self.buffers.resize_with(id + 1, || None);
        }
        self.buffers[id] = Some((kind, Vec::new()));
        Ok(RecBuffer { id })
    }

    fn update_buffer(&mut self, buffer: &mut RecBuffer, contents: &[u8]) -> Result<()> {
        let call = self.upload_calls;
        self.upload_calls += 1;
        if self.fail_on_upload == Some(call) {
            return Err(BarError::backend(format!("injected failure on upload #{call}")));
        }
        match self.buffers.get_mut(buffer.id) {
            Some(Some((_, bytes))) => {
                bytes.clear();
                bytes.extend_from_slice(contents);
                self.uploads += 1;
                Ok(())
            }
            _ => Err(BarError::backend("update of a disposed buffer")),
        }
    }

    fn dispose_buffer(&mut self, buffer: RecBuffer) {
        if let Some(slot) = self.buffers.get_mut(buffer.id) {
            *slot = None;
        }
    }

    fn create_program(&mut self, kind: ProgramKind) -> Result<RecProgram> {
        self.check_create()?;
        let id = self.alloc_id();
        if self.programs.len() <= id {
            self.programs.resize_with(id + 1, || None);
        }
        self.programs[id] = Some(kind);
        Ok(RecProgram { id, kind })
    }

    fn dispose_program(&mut self, program: RecProgram) {
        if let Some(slot) = self.programs.get_mut(program.id) {
            *slot = None;
        }
    }

    fn draw(&mut self, call: DrawCall<'_, Self>) -> Result<()> {
        let attribute = match call.program.kind {
            ProgramKind::Draw => call.weights,
            ProgramKind::Pick => call.pick_ids,
        };
        self.draws.push(RecordedDraw {
            program: call.program.kind,
            uniforms: call.uniforms,
            vertices: call.vertices,
            positions: call.positions.id,
            attribute: attribute.map(|b| b.id),
        });
        Ok(())
    }
}
