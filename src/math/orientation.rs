use crate::geometry::Coordinate;

/// Turn direction of a point relative to a directed segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Orientation {
    Clockwise = -1,
    Collinear = 0,
    CounterClockwise = 1,
}

impl Orientation {
    fn from_sign(sign: i32) -> Self {
        match sign.signum() {
            1 => Self::CounterClockwise,
            -1 => Self::Clockwise,
            _ => Self::Collinear,
        }
    }

    /// Returns the orientation as `-1`, `0` or `1`.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Returns the opposite turn.
    #[must_use]
    pub fn reversed(self) -> Self {
        Self::from_sign(-self.as_i32())
    }
}

/// Relative error bound for the floating-point filter.
const DP_SAFE_EPSILON: f64 = 1e-15;

/// Orientation of `q` relative to the directed segment `p1 → p2`.
///
/// `CounterClockwise` means `q` lies to the left. A floating-point filter
/// settles most cases; the rest are re-evaluated in double-double arithmetic.
#[must_use]
pub fn orientation_index(p1: &Coordinate, p2: &Coordinate, q: &Coordinate) -> Orientation {
    if let Some(sign) = orientation_filter(p1, p2, q) {
        return Orientation::from_sign(sign);
    }
    let dx1 = DoubleDouble::from(p2.x) - p1.x;
    let dy1 = DoubleDouble::from(p2.y) - p1.y;
    let dx2 = DoubleDouble::from(q.x) - p2.x;
    let dy2 = DoubleDouble::from(q.y) - p2.y;
    let det = dx1 * dy2 - dy1 * dx2;
    Orientation::from_sign(det.signum())
}

/// Returns the sign of the determinant when it is provably correct.
fn orientation_filter(pa: &Coordinate, pb: &Coordinate, pc: &Coordinate) -> Option<i32> {
    let det_left = (pa.x - pc.x) * (pb.y - pc.y);
    let det_right = (pa.y - pc.y) * (pb.x - pc.x);
    let det = det_left - det_right;

    let det_sum = if det_left > 0.0 {
        if det_right <= 0.0 {
            return Some(signum(det));
        }
        det_left + det_right
    } else if det_left < 0.0 {
        if det_right >= 0.0 {
            return Some(signum(det));
        }
        -det_left - det_right
    } else {
        return Some(signum(det));
    };

    let err_bound = DP_SAFE_EPSILON * det_sum;
    if det >= err_bound || -det >= err_bound {
        return Some(signum(det));
    }
    None
}

fn signum(v: f64) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Unevaluated sum of two doubles, giving roughly 106 bits of mantissa.
#[derive(Debug, Clone, Copy)]
struct DoubleDouble {
    hi: f64,
    lo: f64,
}

impl DoubleDouble {
    fn two_sum(a: f64, b: f64) -> Self {
        let s = a + b;
        let bb = s - a;
        let err = (a - (s - bb)) + (b - bb);
        Self { hi: s, lo: err }
    }

    fn quick_two_sum(a: f64, b: f64) -> Self {
        let s = a + b;
        Self {
            hi: s,
            lo: b - (s - a),
        }
    }

    fn signum(self) -> i32 {
        if self.hi > 0.0 || (self.hi == 0.0 && self.lo > 0.0) {
            1
        } else if self.hi < 0.0 || (self.hi == 0.0 && self.lo < 0.0) {
            -1
        } else {
            0
        }
    }
}

impl From<f64> for DoubleDouble {
    fn from(v: f64) -> Self {
        Self { hi: v, lo: 0.0 }
    }
}

impl std::ops::Add for DoubleDouble {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let s = Self::two_sum(self.hi, rhs.hi);
        let t = Self::two_sum(self.lo, rhs.lo);
        let hi_sum = Self::quick_two_sum(s.hi, s.lo + t.hi);
        Self::quick_two_sum(hi_sum.hi, hi_sum.lo + t.lo)
    }
}

impl std::ops::Neg for DoubleDouble {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            hi: -self.hi,
            lo: -self.lo,
        }
    }
}

impl std::ops::Sub for DoubleDouble {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl std::ops::Sub<f64> for DoubleDouble {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        self - Self::from(rhs)
    }
}

impl std::ops::Mul for DoubleDouble {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let p = self.hi * rhs.hi;
        let err = self.hi.mul_add(rhs.hi, -p);
        let lo = err + (self.hi * rhs.lo + self.lo * rhs.hi);
        Self::quick_two_sum(p, lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn left_right_and_collinear() {
        let a = c(0.0, 0.0);
        let b = c(10.0, 0.0);
        assert_eq!(orientation_index(&a, &b, &c(5.0, 1.0)), Orientation::CounterClockwise);
        assert_eq!(orientation_index(&a, &b, &c(5.0, -1.0)), Orientation::Clockwise);
        assert_eq!(orientation_index(&a, &b, &c(20.0, 0.0)), Orientation::Collinear);
    }

    #[test]
    fn near_collinear_large_coordinates() {
        // Three points on the line y = x, far from the origin; the naive
        // determinant suffers cancellation.
        let a = c(1.0e15, 1.0e15);
        let b = c(1.0e15 + 4.0, 1.0e15 + 4.0);
        let q = c(1.0e15 + 2.0, 1.0e15 + 2.0);
        assert_eq!(orientation_index(&a, &b, &q), Orientation::Collinear);
    }

    #[test]
    fn tiny_offset_is_detected() {
        let a = c(0.1, 0.1);
        let b = c(0.3, 0.3);
        let q = c(0.2, 0.2 + 1e-17);
        // 0.2 + 1e-17 rounds to 0.2, so q lies on the (rounded) line or just off it;
        // both evaluation orders must agree.
        assert_eq!(
            orientation_index(&a, &b, &q),
            orientation_index(&b, &a, &q).reversed()
        );
    }

    #[test]
    fn reversed_orientation() {
        assert_eq!(Orientation::Clockwise.reversed(), Orientation::CounterClockwise);
        assert_eq!(Orientation::Collinear.reversed(), Orientation::Collinear);
        assert_eq!(Orientation::CounterClockwise.as_i32(), 1);
    }
}
