use std::collections::BTreeMap;

use super::node::NodeId;
use crate::geometry::{CoordKey, Coordinate};

/// Maps node coordinates to node ids, ordered by coordinate.
#[derive(Debug, Clone, Default)]
pub struct NodeMap {
    map: BTreeMap<CoordKey, NodeId>,
}

impl NodeMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `id` at `coordinate` unless a node is already there.
    ///
    /// Returns the id stored at the coordinate afterwards.
    pub fn add(&mut self, coordinate: Coordinate, id: NodeId) -> NodeId {
        *self.map.entry(CoordKey::new(coordinate)).or_insert(id)
    }

    pub fn remove(&mut self, coordinate: &Coordinate) -> Option<NodeId> {
        self.map.remove(&CoordKey::new(*coordinate))
    }

    #[must_use]
    pub fn find(&self, coordinate: &Coordinate) -> Option<NodeId> {
        self.map.get(&CoordKey::new(*coordinate)).copied()
    }

    /// Node ids in coordinate order.
    pub fn values(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.map.values().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
