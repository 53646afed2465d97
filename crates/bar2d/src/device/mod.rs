//! wgpu device bootstrap for hosts without a window.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue without a surface
//! - allocating offscreen color and pick targets
//! - handing out encoders and submitting them

mod headless;

pub use headless::{GpuContext, GpuInit, OffscreenTarget};
