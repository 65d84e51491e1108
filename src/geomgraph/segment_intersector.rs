use super::GraphEdge;
use crate::geometry::Coordinate;
use crate::math::{LineIntersector, SegmentIntersection};

/// Identifies segment `segment` (from vertex `segment` to `segment + 1`) of
/// edge `edge` in a [`GeometryGraph`](super::GeometryGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SegmentRef {
    pub edge: usize,
    pub segment: usize,
}

/// What self-noding found.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SelfNodingSummary {
    /// Some pair of segments met other than at a shared consecutive vertex.
    pub has_intersection: bool,
    /// The first point where two segments cross in both their interiors.
    pub proper_intersection: Option<Coordinate>,
}

/// Intersects segment pairs and records the results on the edges.
#[derive(Debug, Default)]
pub struct SegmentIntersector {
    li: LineIntersector,
    summary: SelfNodingSummary,
    num_tests: usize,
}

impl SegmentIntersector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn summary(&self) -> SelfNodingSummary {
        self.summary
    }

    #[must_use]
    pub fn num_tests(&self) -> usize {
        self.num_tests
    }

    /// Intersects two segments and records non-trivial intersection points
    /// on both edges.
    pub fn process(&mut self, edges: &mut [GraphEdge], a: SegmentRef, b: SegmentRef) {
        if a == b {
            return;
        }
        self.num_tests += 1;

        let result = {
            let ea = &edges[a.edge].coords;
            let eb = &edges[b.edge].coords;
            self.li.compute(
                &ea[a.segment],
                &ea[a.segment + 1],
                &eb[b.segment],
                &eb[b.segment + 1],
            )
        };
        if !result.has_intersection() || is_trivial(edges, a, b, &result) {
            return;
        }

        self.summary.has_intersection = true;
        if let SegmentIntersection::Point {
            point,
            proper: true,
        } = result
        {
            self.summary.proper_intersection.get_or_insert(point);
        }
        for point in result.points() {
            edges[a.edge].add_intersection(point, a.segment);
            edges[b.edge].add_intersection(point, b.segment);
        }
    }
}

/// A single intersection between consecutive segments of one edge is just
/// their shared vertex. For a closed edge the last and first segments are
/// consecutive too.
fn is_trivial(
    edges: &[GraphEdge],
    a: SegmentRef,
    b: SegmentRef,
    result: &SegmentIntersection,
) -> bool {
    if a.edge != b.edge || result.count() != 1 {
        return false;
    }
    if a.segment.abs_diff(b.segment) == 1 {
        return true;
    }
    let edge = &edges[a.edge];
    if edge.is_closed() {
        let last_segment = edge.coords.len() - 2;
        if (a.segment == 0 && b.segment == last_segment)
            || (b.segment == 0 && a.segment == last_segment)
        {
            return true;
        }
    }
    false
}
