//! GPU bar chart layer for 2D plot hosts.
//!
//! A [`bars::BarLayer`] turns flat `(x0, y0, x1, y1)` interval data into
//! normalized triangle geometry and draws it through a [`gpu::GpuBackend`],
//! either as colored bars or as encoded ids for picking.

pub mod bars;
pub mod coords;
pub mod device;
pub mod error;
pub mod gpu;
pub mod logging;
pub mod paint;
pub mod plot;
pub mod scratch;

pub use bars::{BarLayer, BarOptions, BoundsPolicy, PickResult};
pub use error::{BarError, Result};
pub use plot::{ObjectId, Plot, PlotObject, PlotView};
