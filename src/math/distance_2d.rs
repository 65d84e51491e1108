use crate::geometry::Coordinate;

/// Returns the point on segment `a → b` closest to `p`.
#[must_use]
pub fn closest_point_on_segment(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> Coordinate {
    let ab = a.vector_to(b);
    let len_sq = ab.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return *a;
    }

    // Project the point onto the infinite line, clamp to [0, 1].
    let t = (a.vector_to(p).dot(&ab) / len_sq).clamp(0.0, 1.0);
    Coordinate::from(a.to_point2() + ab * t)
}

/// Returns the minimum distance from `p` to the segment `a → b`.
#[must_use]
pub fn point_to_segment_distance(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> f64 {
    p.distance(&closest_point_on_segment(p, a, b))
}
