use std::ops::Range;

use crate::error::{BarError, Result};

use super::common::{premul_alpha_blend, uniforms_min_binding_size, vertex_layout};
use super::{BarUniforms, BufferKind, DrawCall, GpuBackend, ProgramKind};

/// Format of the pick target: one id byte per channel, no filtering, no blending.
pub const PICK_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Where queued draws land when encoded.
///
/// Either view may be absent; draws for a missing view are discarded.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: Option<&'a wgpu::TextureView>,
    pub pick_view: Option<&'a wgpu::TextureView>,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view: Some(color_view), pick_view: None }
    }

    #[inline]
    pub fn pick(encoder: &'a mut wgpu::CommandEncoder, pick_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view: None, pick_view: Some(pick_view) }
    }
}

/// Vertex buffer that grows on demand.
pub struct WgpuBuffer {
    kind: BufferKind,
    buffer: Option<wgpu::Buffer>,
    capacity: u64,
    len: u64,
}

impl WgpuBuffer {
    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    /// Bytes written by the last update.
    pub fn len_bytes(&self) -> u64 {
        self.len
    }

    pub fn vertex_count(&self) -> u32 {
        (self.len / self.kind.stride()) as u32
    }
}

/// Program handle: pipeline kind plus its own uniform buffer and bind group.
///
/// Uniforms are written when a draw is queued, so one program drawn twice in
/// the same frame renders both draws with the last uniforms.
pub struct WgpuProgram {
    kind: ProgramKind,
    ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl WgpuProgram {
    pub fn kind(&self) -> ProgramKind {
        self.kind
    }
}

struct QueuedDraw {
    kind: ProgramKind,
    bind_group: wgpu::BindGroup,
    positions: wgpu::Buffer,
    attribute: wgpu::Buffer,
    vertices: Range<u32>,
}

/// [`GpuBackend`] over wgpu.
///
/// `draw` only queues work; [`encode`](Self::encode) records the queued draws
/// into the caller's encoder, one color pass and one pick pass, loading the
/// existing attachment contents.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    color_format: wgpu::TextureFormat,

    bind_group_layout: wgpu::BindGroupLayout,
    draw_pipeline: Option<wgpu::RenderPipeline>,
    pick_pipeline: Option<wgpu::RenderPipeline>,

    queued: Vec<QueuedDraw>,
}

impl WgpuBackend {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, color_format: wgpu::TextureFormat) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bar2d uniforms bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: uniforms_min_binding_size(),
                },
                count: None,
            }],
        });

        Self {
            device: device.clone(),
            queue: queue.clone(),
            color_format,
            bind_group_layout,
            draw_pipeline: None,
            pick_pipeline: None,
            queued: Vec::new(),
        }
    }

    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.color_format
    }

    /// Number of draws waiting for [`encode`](Self::encode).
    pub fn queued_draws(&self) -> usize {
        self.queued.len()
    }

    /// Records every queued draw into `target` and clears the queue.
    ///
    /// Returns the number of draws recorded.
    pub fn encode(&mut self, target: &mut RenderTarget<'_>) -> usize {
        if self.queued.is_empty() {
            return 0;
        }
        let queued = std::mem::take(&mut self.queued);

        let mut recorded = 0;
        for (kind, view, pipeline) in [
            (ProgramKind::Draw, target.color_view, self.draw_pipeline.as_ref()),
            (ProgramKind::Pick, target.pick_view, self.pick_pipeline.as_ref()),
        ] {
            let draws: Vec<&QueuedDraw> = queued.iter().filter(|d| d.kind == kind).collect();
            if draws.is_empty() {
                continue;
            }
            let (Some(view), Some(pipeline)) = (view, pipeline) else {
                log::debug!("bar2d: no {kind:?} target; discarding {} queued draws", draws.len());
                continue;
            };

            let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(match kind {
                    ProgramKind::Draw => "bar2d draw pass",
                    ProgramKind::Pick => "bar2d pick pass",
                }),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(pipeline);
            for d in draws {
                rpass.set_bind_group(0, &d.bind_group, &[]);
                rpass.set_vertex_buffer(0, d.positions.slice(..));
                rpass.set_vertex_buffer(1, d.attribute.slice(..));
                rpass.draw(d.vertices.clone(), 0..1);
                recorded += 1;
            }
        }
        recorded
    }

    fn ensure_pipeline(&mut self, kind: ProgramKind) {
        let slot = match kind {
            ProgramKind::Draw => &self.draw_pipeline,
            ProgramKind::Pick => &self.pick_pipeline,
        };
        if slot.is_some() {
            return;
        }

        let (label, src, attribute, target) = match kind {
            ProgramKind::Draw => (
                "bar2d draw",
                include_str!("shaders/bar.wgsl"),
                BufferKind::Weights,
                wgpu::ColorTargetState {
                    format: self.color_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                },
            ),
            ProgramKind::Pick => (
                "bar2d pick",
                include_str!("shaders/bar_pick.wgsl"),
                BufferKind::PickIds,
                wgpu::ColorTargetState {
                    format: PICK_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                },
            ),
        };

        let shader = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(src.into()),
        });

        let pipeline_layout = self.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[&self.bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[vertex_layout(BufferKind::Positions), vertex_layout(attribute)],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(target)],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("bar2d: built {kind:?} pipeline");
        match kind {
            ProgramKind::Draw => self.draw_pipeline = Some(pipeline),
            ProgramKind::Pick => self.pick_pipeline = Some(pipeline),
        }
    }
}

impl GpuBackend for WgpuBackend {
    type Buffer = WgpuBuffer;
    type Program = WgpuProgram;

    fn create_buffer(&mut self, kind: BufferKind) -> Result<WgpuBuffer> {
        Ok(WgpuBuffer { kind, buffer: None, capacity: 0, len: 0 })
    }

    fn update_buffer(&mut self, buffer: &mut WgpuBuffer, contents: &[u8]) -> Result<()> {
        let len = contents.len() as u64;
        if len % wgpu::COPY_BUFFER_ALIGNMENT != 0 {
            return Err(BarError::backend(format!(
                "{:?} upload of {len} bytes is not {}-byte aligned",
                buffer.kind,
                wgpu::COPY_BUFFER_ALIGNMENT
            )));
        }

        if len > buffer.capacity || buffer.buffer.is_none() {
            let new_cap = len.next_power_of_two().max(256);
            // Queued draws hold their own clone of the old buffer; dropping ours is enough.
            buffer.buffer = None;
            buffer.buffer = Some(self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("bar2d vertex buffer"),
                size: new_cap,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            buffer.capacity = new_cap;
        }

        if let Some(gpu) = buffer.buffer.as_ref() {
            if len > 0 {
                self.queue.write_buffer(gpu, 0, contents);
            }
        }
        buffer.len = len;
        Ok(())
    }

    // Handles are dropped, not destroyed: a draw queued before disposal still
    // references them until `encode` has run.
    fn dispose_buffer(&mut self, buffer: WgpuBuffer) {
        drop(buffer);
    }

    fn create_program(&mut self, kind: ProgramKind) -> Result<WgpuProgram> {
        self.ensure_pipeline(kind);

        let ubo = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("bar2d uniforms"),
            size: std::mem::size_of::<BarUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bar2d uniforms bind group"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        Ok(WgpuProgram { kind, ubo, bind_group })
    }

    fn dispose_program(&mut self, program: WgpuProgram) {
        drop(program);
    }

    fn draw(&mut self, call: DrawCall<'_, Self>) -> Result<()> {
        let kind = call.program.kind;
        let attribute = match kind {
            ProgramKind::Draw => call.weights,
            ProgramKind::Pick => call.pick_ids,
        }
        .ok_or_else(|| BarError::backend(format!("{kind:?} draw is missing its attribute buffer")))?;

        let vertex_count = call.positions.vertex_count().min(attribute.vertex_count());
        if call.vertices.end > vertex_count {
            return Err(BarError::backend(format!(
                "draw range {:?} exceeds {vertex_count} uploaded vertices",
                call.vertices
            )));
        }

        let (Some(positions), Some(attr)) = (call.positions.buffer.as_ref(), attribute.buffer.as_ref())
        else {
            return Err(BarError::backend("draw from a buffer that was never uploaded"));
        };

        self.queue.write_buffer(&call.program.ubo, 0, bytemuck::bytes_of(&call.uniforms));

        self.queued.push(QueuedDraw {
            kind,
            bind_group: call.program.bind_group.clone(),
            positions: positions.clone(),
            attribute: attr.clone(),
            vertices: call.vertices,
        });
        Ok(())
    }
}
