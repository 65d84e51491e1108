use slotmap::SlotMap;

use super::directed_edge::{DirectedEdge, DirectedEdgeId};

/// The directed edges leaving a node, ordered counter-clockwise by direction.
///
/// Sorting is deferred until an ordered view is needed; adding or removing
/// an edge marks the star unsorted.
#[derive(Debug, Clone, Default)]
pub struct DirectedEdgeStar {
    out_edges: Vec<DirectedEdgeId>,
    sorted: bool,
}

impl DirectedEdgeStar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, de: DirectedEdgeId) {
        self.out_edges.push(de);
        self.sorted = false;
    }

    pub(crate) fn remove(&mut self, de: DirectedEdgeId) {
        self.out_edges.retain(|&id| id != de);
        self.sorted = false;
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.out_edges.len()
    }

    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// The edges in their current order, which is only angular once
    /// [`sort`](Self::sort) has run.
    #[must_use]
    pub fn edges(&self) -> &[DirectedEdgeId] {
        &self.out_edges
    }

    pub(crate) fn sort<T>(&mut self, arena: &SlotMap<DirectedEdgeId, DirectedEdge<T>>) {
        if self.sorted {
            return;
        }
        self.out_edges.sort_by(|a, b| match (arena.get(*a), arena.get(*b)) {
            (Some(ea), Some(eb)) => ea.compare_direction(eb),
            _ => std::cmp::Ordering::Equal,
        });
        self.sorted = true;
    }

    /// Position of `de` in the sorted order.
    pub(crate) fn index_of(&self, de: DirectedEdgeId) -> Option<usize> {
        self.out_edges.iter().position(|&id| id == de)
    }

    /// The edge after `de` counter-clockwise. Requires a sorted star.
    pub(crate) fn next_ccw(&self, de: DirectedEdgeId) -> Option<DirectedEdgeId> {
        let i = self.index_of(de)?;
        Some(self.out_edges[(i + 1) % self.out_edges.len()])
    }

    /// The edge before `de` counter-clockwise. Requires a sorted star.
    pub(crate) fn next_cw(&self, de: DirectedEdgeId) -> Option<DirectedEdgeId> {
        let i = self.index_of(de)?;
        let n = self.out_edges.len();
        Some(self.out_edges[(i + n - 1) % n])
    }
}
