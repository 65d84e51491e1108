use std::cmp::Ordering;
use std::fmt;

use crate::math::{Point2, Vector2};

/// A planar coordinate with an optional elevation.
///
/// Equality is exact and two-dimensional: `z` never takes part in
/// comparisons, so two coordinates with the same `x`/`y` denote the same
/// graph node.
#[derive(Debug, Clone, Copy, Default)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Coordinate {
    /// Creates a 2D coordinate.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Creates a coordinate carrying an elevation.
    #[must_use]
    pub const fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Returns `true` if both ordinates are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Exact 2D equality.
    #[must_use]
    pub fn equals_2d(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Euclidean distance to another coordinate.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.to_point2() - other.to_point2()).norm()
    }

    /// Total order by `x`, then `y`.
    ///
    /// Signed zeros compare equal; NaN sorts after every number.
    #[must_use]
    pub fn compare_2d(&self, other: &Self) -> Ordering {
        normalize_zero(self.x)
            .total_cmp(&normalize_zero(other.x))
            .then_with(|| normalize_zero(self.y).total_cmp(&normalize_zero(other.y)))
    }

    /// Returns this coordinate as an nalgebra point.
    #[must_use]
    pub fn to_point2(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// Returns the vector from `self` to `other`.
    #[must_use]
    pub fn vector_to(&self, other: &Self) -> Vector2 {
        other.to_point2() - self.to_point2()
    }

    /// Returns a copy translated by `(dx, dy)`, keeping `z`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z,
        }
    }
}

fn normalize_zero(v: f64) -> f64 {
    // -0.0 + 0.0 == +0.0
    v + 0.0
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.equals_2d(other)
    }
}

impl From<Point2> for Coordinate {
    fn from(p: Point2) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.z {
            Some(z) => write!(f, "({}, {}, {})", self.x, self.y, z),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

/// Ordered, hashable key for a coordinate's 2D position.
///
/// Used wherever a coordinate identifies a node (node maps, intersection
/// sets). Ordering follows [`Coordinate::compare_2d`].
#[derive(Debug, Clone, Copy)]
pub struct CoordKey(Coordinate);

impl CoordKey {
    #[must_use]
    pub fn new(c: Coordinate) -> Self {
        Self(c)
    }

    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        self.0
    }
}

impl From<Coordinate> for CoordKey {
    fn from(c: Coordinate) -> Self {
        Self(c)
    }
}

impl PartialEq for CoordKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CoordKey {}

impl PartialOrd for CoordKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CoordKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.compare_2d(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn equality_ignores_z() {
        assert_eq!(Coordinate::new(1.0, 2.0), Coordinate::new_3d(1.0, 2.0, 9.0));
        assert_ne!(Coordinate::new(1.0, 2.0), Coordinate::new(2.0, 1.0));
    }

    #[test]
    fn ordering_is_x_then_y() {
        let a = Coordinate::new(0.0, 5.0);
        let b = Coordinate::new(1.0, 0.0);
        let c = Coordinate::new(1.0, 1.0);
        assert_eq!(a.compare_2d(&b), Ordering::Less);
        assert_eq!(b.compare_2d(&c), Ordering::Less);
        assert_eq!(c.compare_2d(&c), Ordering::Equal);
    }

    #[test]
    fn signed_zeros_share_a_key() {
        let mut set = BTreeSet::new();
        set.insert(CoordKey::new(Coordinate::new(0.0, -0.0)));
        assert!(set.contains(&CoordKey::new(Coordinate::new(-0.0, 0.0))));
    }

    #[test]
    fn non_finite_detected() {
        assert!(Coordinate::new(1.0, 2.0).is_finite());
        assert!(!Coordinate::new(f64::NAN, 2.0).is_finite());
        assert!(!Coordinate::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn distance_3_4_5() {
        let d = Coordinate::new(0.0, 0.0).distance(&Coordinate::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn display_with_and_without_z() {
        assert_eq!(Coordinate::new(1.0, 2.5).to_string(), "(1, 2.5)");
        assert_eq!(Coordinate::new_3d(1.0, 2.0, 3.0).to_string(), "(1, 2, 3)");
    }
}
