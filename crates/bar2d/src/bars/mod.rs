//! Bar chart layer.
//!
//! Data flow:
//! - [`geometry`] validates intervals, folds bounds and packs vertices
//! - [`transform`] turns bounds + host view into shader uniforms
//! - [`pick`] encodes interval indices for the pick pass and resolves hits
//! - [`BarLayer`] owns the GPU resources and ties the above together

pub mod geometry;
pub mod pick;
pub mod transform;

mod layer;
mod options;

pub use layer::BarLayer;
pub use options::{BarOptions, BoundsPolicy};
pub use pick::{decode_pick_id, decode_pick_pixel, encode_pick_id, PickResult};
