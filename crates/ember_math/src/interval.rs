/// A closed interval [min, max] on the real line.
///
/// Used for ray t-ranges and for the per-axis slabs of an [`crate::Aabb`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true if x is within [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within (min, max).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Expands the interval by delta/2 on each side.
    pub fn expand(&self, delta: f32) -> Interval {
        let padding = delta / 2.0;
        Interval::new(self.min - padding, self.max + padding)
    }

    /// Shifts both endpoints by a scalar displacement.
    pub fn add_scalar(&self, displacement: f32) -> Interval {
        Interval::new(self.min + displacement, self.max + displacement)
    }

    /// Smallest interval containing both a and b.
    pub fn surrounding(a: &Interval, b: &Interval) -> Interval {
        Interval::new(a.min.min(b.min), a.max.max(b.max))
    }

    /// An empty interval (min > max, contains nothing).
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// An interval that contains everything.
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_surrounds_is_not() {
        let i = Interval::new(0.0, 10.0);

        assert!(i.contains(0.0));
        assert!(i.contains(10.0));
        assert!(!i.contains(10.1));

        assert!(!i.surrounds(0.0));
        assert!(!i.surrounds(10.0));
        assert!(i.surrounds(5.0));
    }

    #[test]
    fn expand_pads_both_sides() {
        let i = Interval::new(0.0, 10.0).expand(4.0);
        assert_eq!(i.min, -2.0);
        assert_eq!(i.max, 12.0);
    }

    #[test]
    fn surrounding_covers_both() {
        let a = Interval::new(-1.0, 2.0);
        let b = Interval::new(1.0, 5.0);
        let s = Interval::surrounding(&a, &b);
        assert_eq!(s.min, -1.0);
        assert_eq!(s.max, 5.0);
    }

    #[test]
    fn empty_contains_nothing() {
        assert!(!Interval::EMPTY.contains(0.0));
        assert!(Interval::UNIVERSE.contains(1e10));
    }
}
