use crate::paint::Color;

/// How a layer's bounds react to a new [`BarOptions`] update.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum BoundsPolicy {
    /// Merge the new data extent with the bounds of previous updates.
    /// Bounds never shrink until [`BarLayer::reset_bounds`](super::BarLayer::reset_bounds).
    #[default]
    Accumulate,
    /// Recompute bounds from this update's data only.
    Reset,
}

/// Data and style for one layer update.
///
/// Style fields are not sticky: every update applies the values carried
/// here, so fields left at their defaults reset the style.
#[derive(Debug, Clone, PartialEq)]
pub struct BarOptions {
    /// Flat `(x0, y0, x1, y1)` intervals in data space, in draw order.
    pub positions: Vec<f64>,
    /// Fill width in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Border width in logical pixels; `0` disables the border.
    pub border_size: f32,
    pub border_color: Color,
    pub bounds_policy: BoundsPolicy,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            size: 12.0,
            color: Color::red(),
            border_size: 1.0,
            border_color: Color::black(),
            bounds_policy: BoundsPolicy::default(),
        }
    }
}

impl BarOptions {
    pub fn new(positions: impl Into<Vec<f64>>) -> Self {
        Self { positions: positions.into(), ..Self::default() }
    }

    /// Builds options from `(x0, y0, x1, y1)` tuples.
    pub fn from_intervals(intervals: &[[f64; 4]]) -> Self {
        Self::new(intervals.concat())
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn border_size(mut self, border_size: f32) -> Self {
        self.border_size = border_size;
        self
    }

    pub fn border_color(mut self, color: impl Into<Color>) -> Self {
        self.border_color = color.into();
        self
    }

    pub fn bounds_policy(mut self, policy: BoundsPolicy) -> Self {
        self.bounds_policy = policy;
        self
    }
}
