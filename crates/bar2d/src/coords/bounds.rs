/// Axis-aligned box `[lo_x, lo_y, hi_x, hi_y]`.
///
/// Used for data bounds of a layer, for the host's visible data box and for
/// the host's view box in pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    pub lo_x: f64,
    pub lo_y: f64,
    pub hi_x: f64,
    pub hi_y: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Bounds {
    /// Identity element for [`union`](Self::union): contains nothing.
    pub const EMPTY: Bounds = Bounds {
        lo_x: f64::INFINITY,
        lo_y: f64::INFINITY,
        hi_x: f64::NEG_INFINITY,
        hi_y: f64::NEG_INFINITY,
    };

    #[inline]
    pub const fn new(lo_x: f64, lo_y: f64, hi_x: f64, hi_y: f64) -> Self {
        Self { lo_x, lo_y, hi_x, hi_y }
    }

    #[inline]
    pub const fn from_array(b: [f64; 4]) -> Self {
        Self::new(b[0], b[1], b[2], b[3])
    }

    #[inline]
    pub const fn to_array(self) -> [f64; 4] {
        [self.lo_x, self.lo_y, self.hi_x, self.hi_y]
    }

    #[inline]
    pub fn width(self) -> f64 {
        self.hi_x - self.lo_x
    }

    #[inline]
    pub fn height(self) -> f64 {
        self.hi_y - self.lo_y
    }

    /// True when no interval has been folded in yet (or the box is inverted).
    #[inline]
    pub fn is_empty(self) -> bool {
        !(self.lo_x <= self.hi_x && self.lo_y <= self.hi_y)
    }

    /// Folds both corners of one bar interval in. Corners may come in either
    /// order, so a downward bar (`y1 < y0`) widens the box like any other.
    #[inline]
    pub fn include_interval(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.lo_x = self.lo_x.min(x0.min(x1));
        self.lo_y = self.lo_y.min(y0.min(y1));
        self.hi_x = self.hi_x.max(x0.max(x1));
        self.hi_y = self.hi_y.max(y0.max(y1));
    }

    #[inline]
    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            lo_x: self.lo_x.min(other.lo_x),
            lo_y: self.lo_y.min(other.lo_y),
            hi_x: self.hi_x.max(other.hi_x),
            hi_y: self.hi_y.max(other.hi_y),
        }
    }

    /// Maps a data-space point into this box's unit square.
    ///
    /// A zero or non-finite extent collapses that axis to `0` instead of
    /// producing NaN vertices.
    #[inline]
    pub fn normalize(self, x: f64, y: f64) -> [f32; 2] {
        fn unit(c: f64, lo: f64, extent: f64) -> f32 {
            if extent > 0.0 && extent.is_finite() { ((c - lo) / extent) as f32 } else { 0.0 }
        }
        [unit(x, self.lo_x, self.width()), unit(y, self.lo_y, self.height())]
    }
}
