//! Arena-backed planar graph.
//!
//! Nodes, edges and directed edges live in slot maps owned by the
//! [`PlanarGraph`] and refer to each other through generational ids, so an id
//! kept across a removal reports [`GraphError`] instead of aliasing new data.
//! Every edge owns exactly two directed edges which are each other's `sym`,
//! and every directed edge sits in the star of its origin node.

pub mod directed_edge;
pub mod directed_edge_star;
pub mod edge;
pub mod node;
pub mod node_map;

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

pub use directed_edge::{DirectedEdge, DirectedEdgeId, Quadrant};
pub use directed_edge_star::DirectedEdgeStar;
pub use edge::{Edge, EdgeId};
pub use node::{Node, NodeId};
pub use node_map::NodeMap;

use crate::error::GraphError;
use crate::geometry::Coordinate;

/// A planar graph whose directed edges carry a payload `T`.
#[derive(Debug, Clone)]
pub struct PlanarGraph<T> {
    nodes: SlotMap<NodeId, Node>,
    edges: SlotMap<EdgeId, Edge>,
    directed_edges: SlotMap<DirectedEdgeId, DirectedEdge<T>>,
    node_map: NodeMap,
}

impl<T> Default for PlanarGraph<T> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            directed_edges: SlotMap::with_key(),
            node_map: NodeMap::new(),
        }
    }
}

impl<T> PlanarGraph<T> {
    /// Creates a new, empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Node operations ---

    /// Returns the node at `coordinate`, creating it if needed.
    pub fn add_node(&mut self, coordinate: Coordinate) -> NodeId {
        if let Some(id) = self.node_map.find(&coordinate) {
            return id;
        }
        let id = self.nodes.insert(Node::new(coordinate));
        self.node_map.add(coordinate, id)
    }

    /// Returns the node data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] for a stale or foreign id.
    pub fn node(&self, id: NodeId) -> Result<&Node, GraphError> {
        self.nodes.get(id).ok_or(GraphError::NodeNotFound)
    }

    #[must_use]
    pub fn find_node(&self, coordinate: &Coordinate) -> Option<NodeId> {
        self.node_map.find(coordinate)
    }

    /// Nodes with exactly `degree` outgoing edges, in coordinate order.
    #[must_use]
    pub fn find_nodes_of_degree(&self, degree: usize) -> Vec<NodeId> {
        self.node_map
            .values()
            .filter(|&id| self.nodes.get(id).is_some_and(|n| n.degree() == degree))
            .collect()
    }

    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] for a stale or foreign id.
    pub fn degree(&self, id: NodeId) -> Result<usize, GraphError> {
        Ok(self.node(id)?.degree())
    }

    /// The directed edges leaving `id`, sorted counter-clockwise.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] for a stale or foreign id.
    pub fn out_edges(&mut self, id: NodeId) -> Result<&[DirectedEdgeId], GraphError> {
        let node = self.nodes.get_mut(id).ok_or(GraphError::NodeNotFound)?;
        node.star.sort(&self.directed_edges);
        Ok(node.star.edges())
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Removes a node together with every edge incident to it.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] for a stale or foreign id.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), GraphError> {
        let node = self.nodes.get(id).ok_or(GraphError::NodeNotFound)?;
        let incident: Vec<EdgeId> = node
            .star
            .edges()
            .iter()
            .filter_map(|de| self.directed_edges.get(*de).map(|d| d.edge))
            .collect();
        for edge in incident {
            // A loop edge appears twice in the star.
            if self.edges.contains_key(edge) {
                self.remove_edge(edge)?;
            }
        }
        if let Some(node) = self.nodes.remove(id) {
            self.node_map.remove(&node.coordinate());
        }
        Ok(())
    }

    // --- Edge operations ---

    /// Adds a straight edge between two existing nodes.
    ///
    /// `forward` is the payload of the directed edge `from → to` and
    /// `reverse` that of `to → from`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if either node is missing, or
    /// [`GraphError::DegenerateDirection`] if both nodes are the same.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        forward: T,
        reverse: T,
    ) -> Result<EdgeId, GraphError> {
        let from_pt = self.node(from)?.coordinate();
        let to_pt = self.node(to)?.coordinate();
        self.add_edge_with_direction_points(from, to, to_pt, from_pt, forward, reverse)
    }

    /// Adds an edge whose end directions are given explicitly.
    ///
    /// `from_direction` is the point the edge heads towards when leaving
    /// `from`, `to_direction` the point it heads towards when leaving `to`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if either node is missing, or
    /// [`GraphError::DegenerateDirection`] if a direction point coincides
    /// with its node.
    pub fn add_edge_with_direction_points(
        &mut self,
        from: NodeId,
        to: NodeId,
        from_direction: Coordinate,
        to_direction: Coordinate,
        forward: T,
        reverse: T,
    ) -> Result<EdgeId, GraphError> {
        let from_pt = self.node(from)?.coordinate();
        let to_pt = self.node(to)?.coordinate();
        let fwd = DirectedEdge::new(from, to, from_pt, from_direction, true, forward)?;
        let rev = DirectedEdge::new(to, from, to_pt, to_direction, false, reverse)?;

        let fwd_id = self.directed_edges.insert(fwd);
        let rev_id = self.directed_edges.insert(rev);
        let edge_id = self.edges.insert(Edge::new(fwd_id, rev_id));
        for (id, sym) in [(fwd_id, rev_id), (rev_id, fwd_id)] {
            if let Some(de) = self.directed_edges.get_mut(id) {
                de.sym = sym;
                de.edge = edge_id;
            }
        }
        if let Some(node) = self.nodes.get_mut(from) {
            node.star.add(fwd_id);
        }
        if let Some(node) = self.nodes.get_mut(to) {
            node.star.add(rev_id);
        }
        Ok(edge_id)
    }

    /// # Errors
    ///
    /// Returns [`GraphError::EdgeNotFound`] for a stale or foreign id.
    pub fn edge(&self, id: EdgeId) -> Result<&Edge, GraphError> {
        self.edges.get(id).ok_or(GraphError::EdgeNotFound)
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Removes an edge and both of its directed edges. Its nodes stay.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EdgeNotFound`] for a stale or foreign id.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<(), GraphError> {
        let edge = self.edges.remove(id).ok_or(GraphError::EdgeNotFound)?;
        for de_id in edge.directed_edges() {
            if let Some(de) = self.directed_edges.remove(de_id) {
                if let Some(node) = self.nodes.get_mut(de.from) {
                    node.star.remove(de_id);
                }
            }
        }
        Ok(())
    }

    /// Whether `id` no longer refers to an edge of this graph.
    #[must_use]
    pub fn is_removed(&self, id: EdgeId) -> bool {
        !self.edges.contains_key(id)
    }

    // --- Directed edge operations ---

    /// # Errors
    ///
    /// Returns [`GraphError::DirectedEdgeNotFound`] for a stale or foreign id.
    pub fn directed_edge(&self, id: DirectedEdgeId) -> Result<&DirectedEdge<T>, GraphError> {
        self.directed_edges
            .get(id)
            .ok_or(GraphError::DirectedEdgeNotFound)
    }

    /// # Errors
    ///
    /// Returns [`GraphError::DirectedEdgeNotFound`] for a stale or foreign id.
    pub fn directed_edge_mut(
        &mut self,
        id: DirectedEdgeId,
    ) -> Result<&mut DirectedEdge<T>, GraphError> {
        self.directed_edges
            .get_mut(id)
            .ok_or(GraphError::DirectedEdgeNotFound)
    }

    pub fn directed_edges(&self) -> impl Iterator<Item = (DirectedEdgeId, &DirectedEdge<T>)> {
        self.directed_edges.iter()
    }

    /// # Errors
    ///
    /// Returns [`GraphError::DirectedEdgeNotFound`] for a stale or foreign id.
    pub fn sym(&self, id: DirectedEdgeId) -> Result<DirectedEdgeId, GraphError> {
        Ok(self.directed_edge(id)?.sym)
    }

    /// The next directed edge counter-clockwise around the origin of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DirectedEdgeNotFound`] for a stale id, or
    /// [`GraphError::NodeNotFound`] if its origin has been removed.
    pub fn next_edge(&mut self, id: DirectedEdgeId) -> Result<DirectedEdgeId, GraphError> {
        let star = self.sorted_origin_star(id)?;
        star.next_ccw(id).ok_or(GraphError::DirectedEdgeNotFound)
    }

    /// The next directed edge clockwise around the origin of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DirectedEdgeNotFound`] for a stale id, or
    /// [`GraphError::NodeNotFound`] if its origin has been removed.
    pub fn next_cw_edge(&mut self, id: DirectedEdgeId) -> Result<DirectedEdgeId, GraphError> {
        let star = self.sorted_origin_star(id)?;
        star.next_cw(id).ok_or(GraphError::DirectedEdgeNotFound)
    }

    fn sorted_origin_star(&mut self, id: DirectedEdgeId) -> Result<&DirectedEdgeStar, GraphError> {
        let from = self.directed_edge(id)?.from;
        let node = self.nodes.get_mut(from).ok_or(GraphError::NodeNotFound)?;
        node.star.sort(&self.directed_edges);
        Ok(&node.star)
    }

    // --- Whole-graph queries ---

    /// Groups nodes into sets connected through edges.
    ///
    /// Components are discovered in node insertion order.
    #[must_use]
    pub fn connected_components(&self) -> Vec<Vec<NodeId>> {
        let mut visited: SecondaryMap<NodeId, ()> = SecondaryMap::new();
        let mut components = Vec::new();
        for start in self.nodes.keys() {
            if visited.contains_key(start) {
                continue;
            }
            visited.insert(start, ());
            let mut component = Vec::new();
            let mut queue = VecDeque::from([start]);
            while let Some(id) = queue.pop_front() {
                component.push(id);
                let Some(node) = self.nodes.get(id) else {
                    continue;
                };
                for de in node.star.edges() {
                    let Some(to) = self.directed_edges.get(*de).map(|d| d.to) else {
                        continue;
                    };
                    if visited.insert(to, ()).is_none() {
                        queue.push_back(to);
                    }
                }
            }
            components.push(component);
        }
        components
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    /// A node at the origin with four spokes, added in scrambled order.
    fn spokes() -> (PlanarGraph<&'static str>, NodeId, [DirectedEdgeId; 4]) {
        let mut g = PlanarGraph::new();
        let o = g.add_node(c(0.0, 0.0));
        let n = g.add_node(c(0.0, 1.0));
        let s = g.add_node(c(0.0, -1.0));
        let e = g.add_node(c(1.0, 0.0));
        let w = g.add_node(c(-1.0, 0.0));
        let mut outs = Vec::new();
        for (to, name) in [(s, "s"), (w, "w"), (e, "e"), (n, "n")] {
            let edge = g.add_edge(o, to, name, "back").unwrap();
            outs.push(g.edge(edge).unwrap().directed_edge(0));
        }
        (g, o, [outs[2], outs[3], outs[1], outs[0]])
    }

    #[test]
    fn add_node_is_idempotent() {
        let mut g: PlanarGraph<()> = PlanarGraph::new();
        let a = g.add_node(c(1.0, 2.0));
        let b = g.add_node(c(1.0, 2.0));
        assert_eq!(a, b);
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.find_node(&c(1.0, 2.0)), Some(a));
        assert_eq!(g.find_node(&c(2.0, 1.0)), None);
    }

    #[test]
    fn edges_have_symmetric_directed_edges() {
        let mut g = PlanarGraph::new();
        let a = g.add_node(c(0.0, 0.0));
        let b = g.add_node(c(3.0, 4.0));
        let edge = g.add_edge(a, b, 1, 2).unwrap();
        let [fwd, rev] = g.edge(edge).unwrap().directed_edges();
        assert_eq!(g.sym(fwd).unwrap(), rev);
        assert_eq!(g.sym(rev).unwrap(), fwd);
        let f = g.directed_edge(fwd).unwrap();
        assert_eq!(f.from_node(), a);
        assert_eq!(f.to_node(), b);
        assert_eq!(*f.data(), 1);
        assert!(f.edge_direction());
        assert_eq!(*g.directed_edge(rev).unwrap().data(), 2);
        assert_eq!(g.degree(a).unwrap(), 1);
        assert_eq!(g.degree(b).unwrap(), 1);
    }

    #[test]
    fn zero_length_edge_is_rejected() {
        let mut g = PlanarGraph::new();
        let a = g.add_node(c(0.0, 0.0));
        assert!(matches!(
            g.add_edge(a, a, (), ()),
            Err(GraphError::DegenerateDirection { .. })
        ));
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.degree(a).unwrap(), 0);
    }

    #[test]
    fn star_is_sorted_counter_clockwise() {
        let (mut g, o, [e, n, w, s]) = spokes();
        assert_eq!(g.out_edges(o).unwrap(), &[e, n, w, s]);
        assert_eq!(g.next_edge(e).unwrap(), n);
        assert_eq!(g.next_edge(s).unwrap(), e);
        assert_eq!(g.next_cw_edge(e).unwrap(), s);
        assert_eq!(g.next_cw_edge(w).unwrap(), n);
    }

    #[test]
    fn degree_queries() {
        let (g, o, _) = spokes();
        assert_eq!(g.find_nodes_of_degree(4), vec![o]);
        assert_eq!(g.find_nodes_of_degree(1).len(), 4);
        assert!(g.find_nodes_of_degree(2).is_empty());
    }

    #[test]
    fn remove_edge_unlinks_both_directions() {
        let (mut g, o, [e, ..]) = spokes();
        let edge = g.directed_edge(e).unwrap().edge();
        let east = g.directed_edge(e).unwrap().to_node();
        g.remove_edge(edge).unwrap();
        assert!(g.is_removed(edge));
        assert_eq!(g.degree(o).unwrap(), 3);
        assert_eq!(g.degree(east).unwrap(), 0);
        assert!(matches!(g.directed_edge(e), Err(GraphError::DirectedEdgeNotFound)));
        assert!(matches!(g.remove_edge(edge), Err(GraphError::EdgeNotFound)));
    }

    #[test]
    fn remove_node_removes_incident_edges() {
        let (mut g, o, _) = spokes();
        g.remove_node(o).unwrap();
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.find_node(&c(0.0, 0.0)), None);
        assert!(g.nodes().all(|(_, n)| n.degree() == 0));
        assert!(matches!(g.node(o), Err(GraphError::NodeNotFound)));
    }

    #[test]
    fn connected_components_split_after_removal() {
        let (mut g, o, _) = spokes();
        assert_eq!(g.connected_components().len(), 1);
        g.remove_node(o).unwrap();
        assert_eq!(g.connected_components().len(), 4);
    }

    #[test]
    fn explicit_direction_points() {
        let mut g = PlanarGraph::new();
        let a = g.add_node(c(0.0, 0.0));
        let b = g.add_node(c(2.0, 0.0));
        // An arch-shaped edge leaving a northwards and arriving at b from the north.
        let edge = g
            .add_edge_with_direction_points(a, b, c(0.0, 1.0), c(2.0, 1.0), (), ())
            .unwrap();
        let [fwd, rev] = g.edge(edge).unwrap().directed_edges();
        approx::assert_relative_eq!(
            g.directed_edge(fwd).unwrap().angle(),
            std::f64::consts::FRAC_PI_2
        );
        assert_eq!(g.directed_edge(rev).unwrap().quadrant(), Quadrant::NorthEast);
    }
}
