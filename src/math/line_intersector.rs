use super::orientation::{orientation_index, Orientation};
use crate::geometry::{Coordinate, Envelope};

/// Result of intersecting two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    /// The segments are disjoint.
    None,
    /// A single intersection point.
    ///
    /// `proper` is set when the point lies in the interior of both segments
    /// and is not a vertex of either.
    Point { point: Coordinate, proper: bool },
    /// The segments overlap along the sub-segment `a → b`.
    Collinear { a: Coordinate, b: Coordinate },
}

impl SegmentIntersection {
    #[must_use]
    pub fn has_intersection(&self) -> bool {
        !matches!(self, Self::None)
    }

    #[must_use]
    pub fn is_proper(&self) -> bool {
        matches!(self, Self::Point { proper: true, .. })
    }

    /// Number of distinct intersection points (0, 1 or 2).
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Point { .. } => 1,
            Self::Collinear { .. } => 2,
        }
    }

    /// The intersection points in order.
    #[must_use]
    pub fn points(&self) -> Vec<Coordinate> {
        match *self {
            Self::None => Vec::new(),
            Self::Point { point, .. } => vec![point],
            Self::Collinear { a, b } => vec![a, b],
        }
    }
}

/// Computes intersections between pairs of segments with robust orientation tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineIntersector;

impl LineIntersector {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Intersects segment `p1 → p2` with segment `q1 → q2`.
    #[must_use]
    pub fn compute(
        &self,
        p1: &Coordinate,
        p2: &Coordinate,
        q1: &Coordinate,
        q2: &Coordinate,
    ) -> SegmentIntersection {
        if !Envelope::from_segment(p1, p2).intersects(&Envelope::from_segment(q1, q2)) {
            return SegmentIntersection::None;
        }

        let pq1 = orientation_index(p1, p2, q1);
        let pq2 = orientation_index(p1, p2, q2);
        if same_side(pq1, pq2) {
            return SegmentIntersection::None;
        }

        let qp1 = orientation_index(q1, q2, p1);
        let qp2 = orientation_index(q1, q2, p2);
        if same_side(qp1, qp2) {
            return SegmentIntersection::None;
        }

        let collinear = pq1 == Orientation::Collinear
            && pq2 == Orientation::Collinear
            && qp1 == Orientation::Collinear
            && qp2 == Orientation::Collinear;
        if collinear {
            return collinear_intersection(p1, p2, q1, q2);
        }

        // An endpoint lies on the other segment: the intersection is that endpoint.
        if pq1 == Orientation::Collinear
            || pq2 == Orientation::Collinear
            || qp1 == Orientation::Collinear
            || qp2 == Orientation::Collinear
        {
            let point = if p1.equals_2d(q1) || p1.equals_2d(q2) {
                *p1
            } else if p2.equals_2d(q1) || p2.equals_2d(q2) {
                *p2
            } else if pq1 == Orientation::Collinear {
                *q1
            } else if pq2 == Orientation::Collinear {
                *q2
            } else if qp1 == Orientation::Collinear {
                *p1
            } else {
                *p2
            };
            return SegmentIntersection::Point {
                point,
                proper: false,
            };
        }

        SegmentIntersection::Point {
            point: proper_intersection_point(p1, p2, q1, q2),
            proper: true,
        }
    }

    /// Distance of `p` along the segment `p0 → p1`, measured on the dominant axis.
    ///
    /// Exact for points produced by [`LineIntersector::compute`] and monotone
    /// along the segment, which is all that ordering intersections needs.
    #[must_use]
    pub fn edge_distance(p: &Coordinate, p0: &Coordinate, p1: &Coordinate) -> f64 {
        let dx = (p1.x - p0.x).abs();
        let dy = (p1.y - p0.y).abs();

        if p.equals_2d(p0) {
            return 0.0;
        }
        if p.equals_2d(p1) {
            return dx.max(dy);
        }
        let pdx = (p.x - p0.x).abs();
        let pdy = (p.y - p0.y).abs();
        let dist = if dx > dy { pdx } else { pdy };
        if dist == 0.0 {
            // Rounding put p on p0's line; use the other axis so it stays positive.
            pdx.max(pdy)
        } else {
            dist
        }
    }
}

fn same_side(a: Orientation, b: Orientation) -> bool {
    (a == Orientation::CounterClockwise && b == Orientation::CounterClockwise)
        || (a == Orientation::Clockwise && b == Orientation::Clockwise)
}

fn collinear_intersection(
    p1: &Coordinate,
    p2: &Coordinate,
    q1: &Coordinate,
    q2: &Coordinate,
) -> SegmentIntersection {
    let env_p = Envelope::from_segment(p1, p2);
    let env_q = Envelope::from_segment(q1, q2);
    let q1_in_p = env_p.intersects_coordinate(q1);
    let q2_in_p = env_p.intersects_coordinate(q2);
    let p1_in_q = env_q.intersects_coordinate(p1);
    let p2_in_q = env_q.intersects_coordinate(p2);

    let overlap = |a: &Coordinate, b: &Coordinate, touches_only: bool| {
        if a.equals_2d(b) && touches_only {
            SegmentIntersection::Point {
                point: *a,
                proper: false,
            }
        } else {
            SegmentIntersection::Collinear { a: *a, b: *b }
        }
    };

    if q1_in_p && q2_in_p {
        return overlap(q1, q2, false);
    }
    if p1_in_q && p2_in_q {
        return overlap(p1, p2, false);
    }
    if q1_in_p && p1_in_q {
        return overlap(q1, p1, !q2_in_p && !p2_in_q);
    }
    if q1_in_p && p2_in_q {
        return overlap(q1, p2, !q2_in_p && !p1_in_q);
    }
    if q2_in_p && p1_in_q {
        return overlap(q2, p1, !q1_in_p && !p2_in_q);
    }
    if q2_in_p && p2_in_q {
        return overlap(q2, p2, !q1_in_p && !p1_in_q);
    }
    SegmentIntersection::None
}

/// Intersection of two properly crossing segments.
///
/// Computed relative to the midpoint of the overlap of the segment envelopes
/// to limit cancellation; falls back to the nearest endpoint if rounding
/// pushes the result outside either segment's envelope.
fn proper_intersection_point(
    p1: &Coordinate,
    p2: &Coordinate,
    q1: &Coordinate,
    q2: &Coordinate,
) -> Coordinate {
    let env_p = Envelope::from_segment(p1, p2);
    let env_q = Envelope::from_segment(q1, q2);
    let mid_x = (env_p.min_x.max(env_q.min_x) + env_p.max_x.min(env_q.max_x)) / 2.0;
    let mid_y = (env_p.min_y.max(env_q.min_y) + env_p.max_y.min(env_q.max_y)) / 2.0;

    let a = p1.translated(-mid_x, -mid_y);
    let da = p1.vector_to(p2);
    let b = q1.translated(-mid_x, -mid_y);
    let db = q1.vector_to(q2);

    let cross = da.x * db.y - da.y * db.x;
    let candidate = if cross == 0.0 {
        None
    } else {
        let t = ((b.x - a.x) * db.y - (b.y - a.y) * db.x) / cross;
        Some(Coordinate::new(a.x + da.x * t + mid_x, a.y + da.y * t + mid_y))
    };

    match candidate {
        Some(pt)
            if pt.is_finite()
                && env_p.intersects_coordinate(&pt)
                && env_q.intersects_coordinate(&pt) =>
        {
            pt
        }
        _ => nearest_endpoint(p1, p2, q1, q2),
    }
}

/// The endpoint of either segment closest to the other segment.
fn nearest_endpoint(
    p1: &Coordinate,
    p2: &Coordinate,
    q1: &Coordinate,
    q2: &Coordinate,
) -> Coordinate {
    use super::distance_2d::point_to_segment_distance;

    let candidates = [
        (*p1, point_to_segment_distance(p1, q1, q2)),
        (*p2, point_to_segment_distance(p2, q1, q2)),
        (*q1, point_to_segment_distance(q1, p1, p2)),
        (*q2, point_to_segment_distance(q2, p1, p2)),
    ];
    let mut best = candidates[0];
    for cand in &candidates[1..] {
        if cand.1 < best.1 {
            best = *cand;
        }
    }
    best.0
}
