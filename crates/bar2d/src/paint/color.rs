/// Straight-alpha RGBA color with components in `[0, 1]`.
///
/// Bar options take straight alpha; shaders premultiply before blending.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn red() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn from_array(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Creates a color from straight sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Clamps every channel to `[0, 1]`; non-finite channels become `0`.
    #[inline]
    pub fn clamped(self) -> Self {
        fn c(v: f32) -> f32 {
            if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
        }
        Self::new(c(self.r), c(self.g), c(self.b), c(self.a))
    }
}

impl From<[f32; 4]> for Color {
    #[inline]
    fn from(c: [f32; 4]) -> Self {
        Self::from_array(c)
    }
}
