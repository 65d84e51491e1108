use super::directed_edge::DirectedEdgeId;

slotmap::new_key_type! {
    /// Unique identifier for an undirected edge in a planar graph.
    pub struct EdgeId;
}

/// An undirected edge, represented by its two opposing directed edges.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    directed: [DirectedEdgeId; 2],
}

impl Edge {
    pub(crate) fn new(forward: DirectedEdgeId, reverse: DirectedEdgeId) -> Self {
        Self {
            directed: [forward, reverse],
        }
    }

    /// The directed edge at index 0 (forward) or 1 (reverse).
    #[must_use]
    pub fn directed_edge(&self, index: usize) -> DirectedEdgeId {
        self.directed[index & 1]
    }

    #[must_use]
    pub fn directed_edges(&self) -> [DirectedEdgeId; 2] {
        self.directed
    }
}
