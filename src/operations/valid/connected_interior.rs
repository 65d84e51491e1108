use slotmap::SecondaryMap;

use crate::error::GraphError;
use crate::geometry::Coordinate;
use crate::geomgraph::GeometryGraph;
use crate::math::{signed_area, Location};
use crate::planargraph::DirectedEdgeId;

/// Finds a polygon whose interior is split into more than one piece.
///
/// The noded rings of polygon `polygon` are loaded into a planar graph and
/// every face with the interior on its right is traced by turning as far
/// right as possible at each node. Each connected piece of the interior has
/// exactly one clockwise boundary, so a second clockwise face means the
/// interior is disconnected; its first vertex is returned.
pub(crate) fn find_disconnected_interior(
    graph: &GeometryGraph,
    polygon: usize,
) -> Result<Option<Coordinate>, GraphError> {
    let mut planar = graph.to_planar_graph(|id| id.polygon == polygon)?;
    let starts: Vec<DirectedEdgeId> = planar
        .directed_edges()
        .filter(|(_, de)| de.data().right == Location::Interior)
        .map(|(id, _)| id)
        .collect();

    let mut visited: SecondaryMap<DirectedEdgeId, ()> = SecondaryMap::new();
    let mut clockwise_faces = 0;
    for start in starts {
        if visited.contains_key(start) {
            continue;
        }
        let mut face = Vec::new();
        let mut de = start;
        loop {
            visited.insert(de, ());
            face.push(planar.directed_edge(de)?.coordinate());
            let sym = planar.sym(de)?;
            de = planar.next_edge(sym)?;
            if de == start || visited.contains_key(de) {
                break;
            }
        }
        face.push(face[0]);

        if signed_area(&face) < 0.0 {
            clockwise_faces += 1;
            if clockwise_faces > 1 {
                return Ok(Some(face[0]));
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{LinearRing, Polygon};

    fn disconnected(polygon: Polygon) -> Option<Coordinate> {
        let mut graph = GeometryGraph::new(&polygon.into());
        graph.compute_self_nodes();
        find_disconnected_interior(&graph, 0).unwrap()
    }

    fn shell() -> LinearRing {
        LinearRing::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)])
    }

    #[test]
    fn polygon_with_free_hole_is_connected() {
        let hole =
            LinearRing::from_xy(&[(2.0, 2.0), (2.0, 4.0), (4.0, 4.0), (4.0, 2.0), (2.0, 2.0)]);
        assert_eq!(disconnected(Polygon::new(shell(), vec![hole])), None);
    }

    #[test]
    fn hole_touching_shell_once_is_connected() {
        let hole = LinearRing::from_xy(&[(0.0, 5.0), (5.0, 7.0), (5.0, 3.0), (0.0, 5.0)]);
        assert_eq!(disconnected(Polygon::new(shell(), vec![hole])), None);
    }

    #[test]
    fn hole_touching_shell_twice_disconnects() {
        let hole = LinearRing::from_xy(&[(0.0, 5.0), (10.0, 5.0), (5.0, 8.0), (0.0, 5.0)]);
        assert!(disconnected(Polygon::new(shell(), vec![hole])).is_some());
    }

    #[test]
    fn holes_chained_across_the_polygon_disconnect() {
        let left = LinearRing::from_xy(&[(0.0, 5.0), (5.0, 5.0), (2.0, 7.0), (0.0, 5.0)]);
        let right = LinearRing::from_xy(&[(5.0, 5.0), (10.0, 5.0), (7.0, 7.0), (5.0, 5.0)]);
        assert!(disconnected(Polygon::new(shell(), vec![left, right])).is_some());
    }
}
