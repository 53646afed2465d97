use anyhow::{Context, Result};

use crate::gpu::wgpu_backend::PICK_FORMAT;

/// Device request options.
#[derive(Debug, Clone)]
pub struct GpuInit {
    pub power_preference: wgpu::PowerPreference,
    /// Allow a software adapter when no hardware adapter is found.
    pub force_fallback_adapter: bool,
    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
        }
    }
}

/// Owns wgpu core objects for offscreen rendering.
pub struct GpuContext {
    instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

/// A render-attachment texture with its default view.
pub struct OffscreenTarget {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub format: wgpu::TextureFormat,
}

impl GpuContext {
    /// Creates a device without a surface.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(init: GpuInit) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: None,
                force_fallback_adapter: init.force_fallback_adapter,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        log::debug!("bar2d: using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("bar2d device"),
                required_features: init.required_features,
                required_limits: init.required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        Ok(Self { instance, adapter, device, queue })
    }

    /// Blocking wrapper around [`new`](Self::new).
    pub fn new_blocking(init: GpuInit) -> Result<Self> {
        pollster::block_on(Self::new(init))
    }

    pub fn instance(&self) -> &wgpu::Instance {
        &self.instance
    }

    pub fn adapter(&self) -> &wgpu::Adapter {
        &self.adapter
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Allocates a color target the draw pass can render into.
    pub fn create_color_target(&self, width: u32, height: u32, format: wgpu::TextureFormat) -> Result<OffscreenTarget> {
        self.create_target("bar2d color target", width, height, format)
    }

    /// Allocates a pick target (`Rgba8Unorm`, copyable for readback).
    pub fn create_pick_target(&self, width: u32, height: u32) -> Result<OffscreenTarget> {
        self.create_target("bar2d pick target", width, height, PICK_FORMAT)
    }

    fn create_target(
        &self,
        label: &str,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Result<OffscreenTarget> {
        anyhow::ensure!(width > 0 && height > 0, "{label} has zero size ({width}x{height})");

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(OffscreenTarget { texture, view, format })
    }

    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("bar2d frame encoder"),
        })
    }

    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Copies a 4-byte-per-texel target back to the CPU, rows tightly packed.
    ///
    /// Blocks until the GPU has finished every submitted frame.
    pub fn read_rgba8(&self, target: &OffscreenTarget) -> Result<Vec<u8>> {
        anyhow::ensure!(
            target.format.block_copy_size(None) == Some(4),
            "cannot read back {:?}: expected 4 bytes per texel",
            target.format
        );

        let (width, height) = (target.texture.width(), target.texture.height());
        let row = width * 4;
        let padded_row = row.next_multiple_of(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);

        let staging = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("bar2d readback"),
            size: u64::from(padded_row) * u64::from(height),
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = self.create_encoder();
        encoder.copy_texture_to_buffer(
            target.texture.as_image_copy(),
            wgpu::TexelCopyBufferInfo {
                buffer: &staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            target.texture.size(),
        );
        self.submit(encoder);

        let slice = staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |res| {
            let _ = tx.send(res);
        });
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .context("device poll during readback failed")?;
        rx.recv()
            .context("readback map callback dropped")?
            .context("failed to map readback buffer")?;

        let mapped = slice.get_mapped_range();
        let mut out = Vec::with_capacity(row as usize * height as usize);
        for padded in mapped.chunks_exact(padded_row as usize) {
            out.extend_from_slice(&padded[..row as usize]);
        }
        drop(mapped);
        staging.unmap();

        log::trace!("bar2d: read back {width}x{height} target");
        Ok(out)
    }
}
