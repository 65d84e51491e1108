use std::cmp::Ordering;

use crate::error::GraphError;
use crate::geometry::Coordinate;
use crate::geomgraph::{GeometryGraph, Label, SelfNodingSummary};
use crate::planargraph::DirectedEdge;

/// Why the rings of an area failed to form a consistent topology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum AreaInconsistency {
    /// Two segments cross, or the sides around a node disagree.
    SelfIntersection(Coordinate),
    /// Two rings share a run of edges with the same sides.
    DuplicateRings(Coordinate),
}

/// Checks that the rings of an areal geometry bound a consistent area.
///
/// A proper crossing is reported first. Otherwise every node is checked:
/// around it, directed edges sorted counter-clockwise must agree on the
/// location of each wedge between neighbours, and coincident edges must
/// carry the same sides. Coincident edges with the same sides are only
/// reported once every node has passed.
pub(crate) fn check_consistent_area(
    graph: &GeometryGraph,
    summary: &SelfNodingSummary,
) -> Result<Option<AreaInconsistency>, GraphError> {
    if let Some(pt) = summary.proper_intersection {
        return Ok(Some(AreaInconsistency::SelfIntersection(pt)));
    }

    let mut planar = graph.to_planar_graph(|_| true)?;
    let node_ids: Vec<_> = planar.nodes().map(|(id, _)| id).collect();
    let mut duplicate: Option<Coordinate> = None;

    for id in node_ids {
        let pt = planar.node(id)?.coordinate();
        let out = planar.out_edges(id)?.to_vec();
        let ends = out
            .iter()
            .map(|de| planar.directed_edge(*de))
            .collect::<Result<Vec<_>, _>>()?;

        match check_node(&ends) {
            NodeState::Consistent => {}
            NodeState::Duplicated => {
                duplicate.get_or_insert(pt);
            }
            NodeState::Inconsistent => return Ok(Some(AreaInconsistency::SelfIntersection(pt))),
        }
    }

    Ok(duplicate.map(AreaInconsistency::DuplicateRings))
}

enum NodeState {
    Consistent,
    Duplicated,
    Inconsistent,
}

/// `ends` must be sorted counter-clockwise.
fn check_node(ends: &[&DirectedEdge<Label>]) -> NodeState {
    let mut groups: Vec<(&DirectedEdge<Label>, Label)> = Vec::with_capacity(ends.len());
    let mut duplicated = false;
    for &end in ends {
        if let Some((first, label)) = groups.last() {
            if end.compare_direction(first) == Ordering::Equal {
                if end.data() != label {
                    return NodeState::Inconsistent;
                }
                duplicated = true;
                continue;
            }
        }
        groups.push((end, *end.data()));
    }

    for (k, (_, label)) in groups.iter().enumerate() {
        let (_, next) = groups[(k + 1) % groups.len()];
        if label.left != next.right {
            return NodeState::Inconsistent;
        }
    }

    if duplicated {
        NodeState::Duplicated
    } else {
        NodeState::Consistent
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Geometry, LinearRing, Polygon};

    fn check(geometry: &Geometry) -> Option<AreaInconsistency> {
        let mut graph = GeometryGraph::new(geometry);
        let summary = graph.compute_self_nodes();
        check_consistent_area(&graph, &summary).unwrap()
    }

    fn square(x0: f64, y0: f64, size: f64) -> LinearRing {
        LinearRing::from_xy(&[
            (x0, y0),
            (x0 + size, y0),
            (x0 + size, y0 + size),
            (x0, y0 + size),
            (x0, y0),
        ])
    }

    #[test]
    fn simple_polygon_is_consistent() {
        let polygon = Polygon::new(square(0.0, 0.0, 10.0), vec![square(2.0, 2.0, 2.0)]);
        assert_eq!(check(&polygon.into()), None);
    }

    #[test]
    fn crossing_hole_is_a_self_intersection() {
        let polygon = Polygon::new(square(0.0, 0.0, 4.0), vec![square(3.0, 3.0, 2.0)]);
        assert!(matches!(
            check(&polygon.into()),
            Some(AreaInconsistency::SelfIntersection(_))
        ));
    }

    #[test]
    fn identical_holes_are_duplicates() {
        let polygon = Polygon::new(
            square(0.0, 0.0, 10.0),
            vec![square(1.0, 1.0, 2.0), square(1.0, 1.0, 2.0)],
        );
        assert_eq!(
            check(&polygon.into()),
            Some(AreaInconsistency::DuplicateRings(Coordinate::new(1.0, 1.0)))
        );
    }

    #[test]
    fn hole_touching_shell_at_a_vertex_is_consistent() {
        let hole = LinearRing::from_xy(&[(0.0, 5.0), (10.0, 5.0), (5.0, 8.0), (0.0, 5.0)]);
        let polygon = Polygon::new(square(0.0, 0.0, 10.0), vec![hole]);
        assert_eq!(check(&polygon.into()), None);
    }

    #[test]
    fn polygons_sharing_an_edge_are_inconsistent() {
        let polygons = vec![
            Polygon::new(square(0.0, 0.0, 1.0), vec![]),
            Polygon::new(square(1.0, 0.0, 1.0), vec![]),
        ];
        assert!(matches!(
            check(&Geometry::MultiPolygon(polygons)),
            Some(AreaInconsistency::SelfIntersection(_))
        ));
    }
}
