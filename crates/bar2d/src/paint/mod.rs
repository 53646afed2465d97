//! Colors for bar fill and border.

pub mod color;

pub use color::Color;
