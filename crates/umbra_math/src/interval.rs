/// A closed range of real values, used as the `(t_min, t_max)` window of
/// ray queries and for clamping colors before display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    ///
    /// NaN maps to `min`.
    pub fn clamp(&self, x: f32) -> f32 {
        if x.is_nan() {
            return self.min;
        }
        x.clamp(self.min, self.max)
    }

    /// Same interval with the upper bound replaced.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }

    /// The unit interval [0, 1] colors are clamped to.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };
}
