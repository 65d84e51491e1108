use super::orientation::{orientation_index, Orientation};
use crate::geometry::Coordinate;

/// Topological location of a point relative to an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

/// Computes the signed area of a ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. The ring may be
/// given closed or open.
#[must_use]
pub fn signed_area(ring: &[Coordinate]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    // Shift by the first vertex to keep the products small.
    let x0 = ring[0].x;
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += (ring[i].x - x0) * ring[j].y - (ring[j].x - x0) * ring[i].y;
    }
    sum * 0.5
}

/// Returns `true` if the ring is oriented counter-clockwise.
///
/// Flat rings (zero area) report `false`.
#[must_use]
pub fn is_ccw(ring: &[Coordinate]) -> bool {
    signed_area(ring) > 0.0
}

/// Locates a point relative to a closed ring by counting ray crossings.
///
/// Points on a ring segment report [`Location::Boundary`].
#[must_use]
pub fn locate_point_in_ring(p: &Coordinate, ring: &[Coordinate]) -> Location {
    let mut crossings = 0usize;
    for i in 1..ring.len() {
        match count_segment(p, &ring[i], &ring[i - 1]) {
            Crossing::OnSegment => return Location::Boundary,
            Crossing::Crosses => crossings += 1,
            Crossing::Misses => {}
        }
    }
    if crossings % 2 == 1 {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Returns `true` if the point is inside the ring or on its boundary.
#[must_use]
pub fn is_point_in_ring(p: &Coordinate, ring: &[Coordinate]) -> bool {
    locate_point_in_ring(p, ring) != Location::Exterior
}

enum Crossing {
    Misses,
    Crosses,
    OnSegment,
}

/// Tests a segment against the rightward horizontal ray from `p`.
fn count_segment(p: &Coordinate, p1: &Coordinate, p2: &Coordinate) -> Crossing {
    // Segment strictly left of the ray origin.
    if p1.x < p.x && p2.x < p.x {
        return Crossing::Misses;
    }
    if p.equals_2d(p2) {
        return Crossing::OnSegment;
    }
    // Horizontal segment on the ray line.
    if p1.y == p.y && p2.y == p.y {
        let min_x = p1.x.min(p2.x);
        let max_x = p1.x.max(p2.x);
        if min_x <= p.x && p.x <= max_x {
            return Crossing::OnSegment;
        }
        return Crossing::Misses;
    }
    // Half-open rule: the upper endpoint is included, the lower one is not.
    if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
        let mut orient = orientation_index(p1, p2, p);
        if orient == Orientation::Collinear {
            return Crossing::OnSegment;
        }
        if p2.y < p1.y {
            orient = orient.reversed();
        }
        if orient == Orientation::CounterClockwise {
            return Crossing::Crosses;
        }
    }
    Crossing::Misses
}

/// Removes consecutive repeated vertices.
#[must_use]
pub fn remove_repeated_points(coords: &[Coordinate]) -> Vec<Coordinate> {
    let mut out: Vec<Coordinate> = Vec::with_capacity(coords.len());
    for c in coords {
        if out.last().is_some_and(|last| last.equals_2d(c)) {
            continue;
        }
        out.push(*c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(f64, f64)]) -> Vec<Coordinate> {
        points.iter().copied().map(Coordinate::from).collect()
    }

    fn unit_square_ccw() -> Vec<Coordinate> {
        ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)])
    }

    #[test]
    fn signed_area_ccw_square() {
        assert!((signed_area(&unit_square_ccw()) - 1.0).abs() < 1e-12);
        assert!(is_ccw(&unit_square_ccw()));
    }

    #[test]
    fn signed_area_cw_square() {
        let mut r = unit_square_ccw();
        r.reverse();
        assert!((signed_area(&r) + 1.0).abs() < 1e-12);
        assert!(!is_ccw(&r));
    }

    #[test]
    fn signed_area_degenerate() {
        assert!(signed_area(&[Coordinate::new(0.0, 0.0)]).abs() < 1e-12);
        assert!(signed_area(&[]).abs() < 1e-12);
    }

    #[test]
    fn locate_interior_exterior_boundary() {
        let sq = unit_square_ccw();
        assert_eq!(locate_point_in_ring(&Coordinate::new(0.5, 0.5), &sq), Location::Interior);
        assert_eq!(locate_point_in_ring(&Coordinate::new(1.5, 0.5), &sq), Location::Exterior);
        assert_eq!(locate_point_in_ring(&Coordinate::new(1.0, 0.5), &sq), Location::Boundary);
        assert_eq!(locate_point_in_ring(&Coordinate::new(0.0, 0.0), &sq), Location::Boundary);
        assert_eq!(locate_point_in_ring(&Coordinate::new(0.5, 0.0), &sq), Location::Boundary);
    }

    #[test]
    fn ray_through_vertex_counts_once() {
        // The ray from (0, 1) passes exactly through the vertex (2, 1).
        let diamond = ring(&[(2.0, 0.0), (3.0, 1.0), (2.0, 2.0), (1.0, 1.0), (2.0, 0.0)]);
        assert_eq!(locate_point_in_ring(&Coordinate::new(0.0, 1.0), &diamond), Location::Exterior);
        assert_eq!(locate_point_in_ring(&Coordinate::new(2.0, 1.0), &diamond), Location::Interior);
    }

    #[test]
    fn is_point_in_ring_includes_boundary() {
        let sq = unit_square_ccw();
        assert!(is_point_in_ring(&Coordinate::new(1.0, 1.0), &sq));
        assert!(!is_point_in_ring(&Coordinate::new(2.0, 2.0), &sq));
    }

    #[test]
    fn repeated_points_removed() {
        let r = ring(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (0.0, 0.0)]);
        assert_eq!(remove_repeated_points(&r).len(), 3);
    }
}
