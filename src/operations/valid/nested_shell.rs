use super::nested_ring::find_point_not_node;
use crate::error::OperationError;
use crate::geometry::{Coordinate, Polygon};
use crate::geomgraph::{GeometryGraph, RingId};
use crate::math::is_point_in_ring;

/// Finds a shell of a multipolygon lying inside another of its polygons.
///
/// A shell inside another polygon's shell is only allowed when it also lies
/// inside one of that polygon's holes.
///
/// # Errors
///
/// Returns [`OperationError::ShellHoleIdentity`] if a shell and a hole have
/// no vertex that is not a node of the other, which the consistent-area
/// check rules out.
pub(crate) fn find_nested_shell(
    graph: &GeometryGraph,
    polygons: &[Polygon],
) -> Result<Option<Coordinate>, OperationError> {
    for i in 0..polygons.len() {
        if graph.find_edge(RingId::shell(i)).is_none() {
            continue;
        }
        for (j, polygon) in polygons.iter().enumerate() {
            if i == j {
                continue;
            }
            if let Some(pt) = check_shell_not_nested(graph, i, j, polygon)? {
                return Ok(Some(pt));
            }
        }
    }
    Ok(None)
}

/// Whether shell `shell` of the graph lies illegally inside `polygon`
/// (index `polygon_index`).
fn check_shell_not_nested(
    graph: &GeometryGraph,
    shell: usize,
    polygon_index: usize,
    polygon: &Polygon,
) -> Result<Option<Coordinate>, OperationError> {
    let (Some(shell_edge), Some(poly_shell)) = (
        graph.find_edge(RingId::shell(shell)),
        graph.find_edge(RingId::shell(polygon_index)),
    ) else {
        return Ok(None);
    };

    let Some(shell_pt) =
        find_point_not_node(shell_edge.coordinates(), RingId::shell(polygon_index), graph)
    else {
        return Ok(None);
    };
    if !is_point_in_ring(&shell_pt, poly_shell.coordinates()) {
        return Ok(None);
    }

    let holes: Vec<RingId> = (0..polygon.holes.len())
        .map(|h| RingId::hole(polygon_index, h))
        .filter(|id| graph.find_edge(*id).is_some())
        .collect();
    if holes.is_empty() {
        return Ok(Some(shell_pt));
    }

    let mut bad_nested_pt = None;
    for hole in holes {
        bad_nested_pt = check_shell_inside_hole(graph, RingId::shell(shell), hole)?;
        if bad_nested_pt.is_none() {
            return Ok(None);
        }
    }
    Ok(bad_nested_pt)
}

/// `None` if `shell` lies inside `hole`, otherwise a coordinate showing it
/// does not.
fn check_shell_inside_hole(
    graph: &GeometryGraph,
    shell: RingId,
    hole: RingId,
) -> Result<Option<Coordinate>, OperationError> {
    let (Some(shell_edge), Some(hole_edge)) = (graph.find_edge(shell), graph.find_edge(hole))
    else {
        return Ok(None);
    };
    let shell_pts = shell_edge.coordinates();
    let hole_pts = hole_edge.coordinates();

    if let Some(shell_pt) = find_point_not_node(shell_pts, hole, graph) {
        if !is_point_in_ring(&shell_pt, hole_pts) {
            return Ok(Some(shell_pt));
        }
    }
    if let Some(hole_pt) = find_point_not_node(hole_pts, shell, graph) {
        if is_point_in_ring(&hole_pt, shell_pts) {
            return Ok(Some(hole_pt));
        }
        return Ok(None);
    }
    Err(OperationError::ShellHoleIdentity {
        shell: shell_pts[0],
        hole: hole_pts[0],
    })
}
