use super::directed_edge_star::DirectedEdgeStar;
use crate::geometry::Coordinate;

slotmap::new_key_type! {
    /// Unique identifier for a node in a planar graph.
    pub struct NodeId;
}

/// A vertex of a planar graph.
///
/// Owns the star of directed edges leaving it.
#[derive(Debug, Clone)]
pub struct Node {
    coordinate: Coordinate,
    pub(crate) star: DirectedEdgeStar,
}

impl Node {
    #[must_use]
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            star: DirectedEdgeStar::new(),
        }
    }

    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Number of directed edges leaving this node.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.star.degree()
    }

    #[must_use]
    pub fn star(&self) -> &DirectedEdgeStar {
        &self.star
    }
}
