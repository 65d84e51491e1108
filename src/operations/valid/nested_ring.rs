use crate::geometry::{Coordinate, Envelope};
use crate::geomgraph::{GeometryGraph, RingId};
use crate::index::StrTreeBuilder;
use crate::math::is_point_in_ring;

/// First coordinate of `test` that is not a node of ring `search`.
pub(crate) fn find_point_not_node(
    test: &[Coordinate],
    search: RingId,
    graph: &GeometryGraph,
) -> Option<Coordinate> {
    test.iter()
        .find(|pt| !graph.is_node_of(search, pt))
        .copied()
}

/// Tests whether any ring of a set lies inside another, using an envelope
/// index to find candidate pairs.
#[derive(Debug)]
pub(crate) struct IndexedNestedRingTester<'g> {
    graph: &'g GeometryGraph,
    rings: Vec<RingId>,
}

impl<'g> IndexedNestedRingTester<'g> {
    pub(crate) fn new(graph: &'g GeometryGraph) -> Self {
        Self {
            graph,
            rings: Vec::new(),
        }
    }

    /// Adds a ring. Rings without an edge in the graph are ignored.
    pub(crate) fn add(&mut self, ring: RingId) {
        if self.graph.find_edge(ring).is_some() {
            self.rings.push(ring);
        }
    }

    /// A vertex of some ring lying inside another ring, if any.
    ///
    /// Only a vertex that is not a node of the candidate ring is tested, so
    /// rings that merely touch are not reported.
    pub(crate) fn find_nested_point(&self) -> Option<Coordinate> {
        let rings: Vec<(RingId, &[Coordinate], Envelope)> = self
            .rings
            .iter()
            .filter_map(|&id| {
                let edge = self.graph.find_edge(id)?;
                Some((id, edge.coordinates(), edge.envelope()?))
            })
            .collect();

        let mut builder = StrTreeBuilder::new();
        for (i, (_, _, env)) in rings.iter().enumerate() {
            builder.insert(*env, i);
        }
        let index = builder.build();

        for (i, (_, inner, inner_env)) in rings.iter().enumerate() {
            for &j in index.query(inner_env) {
                if j == i {
                    continue;
                }
                let (search_id, search, _) = rings[j];
                let Some(pt) = find_point_not_node(inner, search_id, self.graph) else {
                    continue;
                };
                if is_point_in_ring(&pt, search) {
                    return Some(pt);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{LinearRing, Polygon};

    fn square(x0: f64, y0: f64, size: f64) -> LinearRing {
        LinearRing::from_xy(&[
            (x0, y0),
            (x0 + size, y0),
            (x0 + size, y0 + size),
            (x0, y0 + size),
            (x0, y0),
        ])
    }

    fn nested_point(holes: Vec<LinearRing>) -> Option<Coordinate> {
        let count = holes.len();
        let polygon = Polygon::new(square(0.0, 0.0, 100.0), holes);
        let mut graph = GeometryGraph::new(&polygon.into());
        graph.compute_self_nodes();
        let mut tester = IndexedNestedRingTester::new(&graph);
        for h in 0..count {
            tester.add(RingId::hole(0, h));
        }
        tester.find_nested_point()
    }

    #[test]
    fn disjoint_holes_are_not_nested() {
        let holes = (0..12)
            .map(|i| square(f64::from(i) * 8.0 + 1.0, 10.0, 5.0))
            .collect();
        assert_eq!(nested_point(holes), None);
    }

    #[test]
    fn hole_inside_hole_is_found() {
        let holes = vec![square(10.0, 10.0, 50.0), square(20.0, 20.0, 5.0)];
        assert_eq!(nested_point(holes), Some(Coordinate::new(20.0, 20.0)));
    }

    #[test]
    fn touching_holes_are_not_nested() {
        let holes = vec![square(10.0, 10.0, 10.0), square(20.0, 10.0, 10.0)];
        assert_eq!(nested_point(holes), None);
    }
}
