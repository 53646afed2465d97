//! Coordinate primitives shared by layers and hosts.
//!
//! Data space uses `f64` so large axis values survive normalization; only the
//! normalized vertices handed to the GPU are `f32`.

mod bounds;

pub use bounds::Bounds;
