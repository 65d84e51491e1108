//! Edge graph of a single geometry, noded against itself.
//!
//! Each line and ring of the geometry becomes one [`GraphEdge`]. Self-noding
//! records every point where edges meet on the edges' intersection lists,
//! which the validity checks then use as the set of nodes.

pub mod edge_intersection_list;
pub mod segment_intersector;

pub use edge_intersection_list::{EdgeIntersection, EdgeIntersectionList};
pub use segment_intersector::{SegmentIntersector, SegmentRef, SelfNodingSummary};

use std::collections::BTreeMap;

use crate::error::GraphError;
use crate::geometry::{Coordinate, Envelope, Geometry, LineString, LinearRing, Polygon};
use crate::index::StrTreeBuilder;
use crate::math::ring::remove_repeated_points;
use crate::math::{is_ccw, LineIntersector, Location};
use crate::planargraph::PlanarGraph;

/// Identifies a ring of the graph's geometry: `ring` 0 is the shell of
/// polygon `polygon`, `ring` `i + 1` its hole `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RingId {
    pub polygon: usize,
    pub ring: usize,
}

impl RingId {
    #[must_use]
    pub fn shell(polygon: usize) -> Self {
        Self { polygon, ring: 0 }
    }

    #[must_use]
    pub fn hole(polygon: usize, hole: usize) -> Self {
        Self {
            polygon,
            ring: hole + 1,
        }
    }

    #[must_use]
    pub fn is_shell(&self) -> bool {
        self.ring == 0
    }
}

/// Location of the area on either side of a directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub left: Location,
    pub right: Location,
}

impl Label {
    /// Label of a ring traversed in its stored direction.
    #[must_use]
    pub fn for_ring(interior_on_left: bool) -> Self {
        if interior_on_left {
            Self {
                left: Location::Interior,
                right: Location::Exterior,
            }
        } else {
            Self {
                left: Location::Exterior,
                right: Location::Interior,
            }
        }
    }

    /// The same sides seen from the opposite direction.
    #[must_use]
    pub fn flip(self) -> Self {
        Self {
            left: self.right,
            right: self.left,
        }
    }
}

/// One line or ring of the geometry.
#[derive(Debug, Clone)]
pub struct GraphEdge {
    pub(crate) coords: Vec<Coordinate>,
    ring: Option<RingId>,
    interior_on_left: bool,
    intersections: EdgeIntersectionList,
}

impl GraphEdge {
    fn line(coords: Vec<Coordinate>) -> Self {
        Self {
            coords,
            ring: None,
            interior_on_left: false,
            intersections: EdgeIntersectionList::new(),
        }
    }

    fn ring(coords: Vec<Coordinate>, id: RingId) -> Self {
        let ccw = is_ccw(&coords);
        Self {
            coords,
            ring: Some(id),
            // Shell interiors are inside the ring, hole interiors outside it.
            interior_on_left: if id.is_shell() { ccw } else { !ccw },
            intersections: EdgeIntersectionList::new(),
        }
    }

    #[must_use]
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coords
    }

    /// The ring this edge came from, `None` for lines.
    #[must_use]
    pub fn ring_id(&self) -> Option<RingId> {
        self.ring
    }

    /// Whether the owning polygon's interior is to the left of the edge
    /// in its stored direction. Meaningless for lines.
    #[must_use]
    pub fn interior_on_left(&self) -> bool {
        self.interior_on_left
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.coords.first(), self.coords.last()) {
            (Some(first), Some(last)) => first.equals_2d(last),
            _ => false,
        }
    }

    #[must_use]
    pub fn intersections(&self) -> &EdgeIntersectionList {
        &self.intersections
    }

    #[must_use]
    pub fn envelope(&self) -> Option<Envelope> {
        Envelope::from_coordinates(&self.coords)
    }

    /// Records `point` on segment `segment`, moving it to the start of the
    /// next segment if it coincides with that vertex.
    pub(crate) fn add_intersection(&mut self, point: Coordinate, segment: usize) {
        let next = segment + 1;
        if self.coords.get(next).is_some_and(|c| c.equals_2d(&point)) {
            self.intersections.add(point, next, 0.0);
            return;
        }
        let dist =
            LineIntersector::edge_distance(&point, &self.coords[segment], &self.coords[next]);
        self.intersections.add(point, segment, dist);
    }

    /// The vertices merged with the noding points, in edge order and with
    /// consecutive duplicates removed.
    #[must_use]
    pub fn noded_coordinates(&self) -> Vec<Coordinate> {
        let mut out: Vec<Coordinate> =
            Vec::with_capacity(self.coords.len() + self.intersections.len());
        let mut pending = self.intersections.iter().peekable();
        for (i, vertex) in self.coords.iter().enumerate() {
            push_distinct(&mut out, *vertex);
            while let Some(ei) = pending.next_if(|ei| ei.segment_index <= i) {
                push_distinct(&mut out, ei.coordinate);
            }
        }
        out
    }
}

fn push_distinct(out: &mut Vec<Coordinate>, c: Coordinate) {
    if !out.last().is_some_and(|last| last.equals_2d(&c)) {
        out.push(c);
    }
}

/// The edges of one geometry plus self-noding state.
#[derive(Debug, Clone, Default)]
pub struct GeometryGraph {
    edges: Vec<GraphEdge>,
    rings: BTreeMap<RingId, usize>,
    too_few_points: Option<Coordinate>,
}

impl GeometryGraph {
    /// Builds the edges of `geometry`. Points contribute nothing.
    ///
    /// Empty components are skipped. A component left with too few distinct
    /// points (lines fewer than 2, rings fewer than 4) is not added; the
    /// first such component is remembered.
    #[must_use]
    pub fn new(geometry: &Geometry) -> Self {
        let mut graph = Self::default();
        graph.add_geometry(geometry, &mut 0);
        graph
    }

    fn add_geometry(&mut self, geometry: &Geometry, next_polygon: &mut usize) {
        match geometry {
            Geometry::Point(_) | Geometry::MultiPoint(_) => {}
            Geometry::LineString(line) => self.add_line(line),
            Geometry::MultiLineString(lines) => lines.iter().for_each(|l| self.add_line(l)),
            Geometry::LinearRing(ring) => {
                self.add_ring(ring, RingId::shell(*next_polygon));
                *next_polygon += 1;
            }
            Geometry::Polygon(polygon) => {
                self.add_polygon(polygon, *next_polygon);
                *next_polygon += 1;
            }
            Geometry::MultiPolygon(polygons) => {
                for polygon in polygons {
                    self.add_polygon(polygon, *next_polygon);
                    *next_polygon += 1;
                }
            }
            Geometry::GeometryCollection(members) => {
                for member in members {
                    self.add_geometry(member, next_polygon);
                }
            }
        }
    }

    fn add_polygon(&mut self, polygon: &Polygon, index: usize) {
        self.add_ring(&polygon.shell, RingId::shell(index));
        for (i, hole) in polygon.holes.iter().enumerate() {
            self.add_ring(hole, RingId::hole(index, i));
        }
    }

    fn add_ring(&mut self, ring: &LinearRing, id: RingId) {
        if ring.is_empty() {
            return;
        }
        let coords = remove_repeated_points(&ring.coords);
        if coords.len() < 4 {
            self.too_few_points.get_or_insert(coords[0]);
            return;
        }
        self.rings.insert(id, self.edges.len());
        self.edges.push(GraphEdge::ring(coords, id));
    }

    fn add_line(&mut self, line: &LineString) {
        if line.is_empty() {
            return;
        }
        let coords = remove_repeated_points(&line.coords);
        if coords.len() < 2 {
            self.too_few_points.get_or_insert(coords[0]);
            return;
        }
        self.edges.push(GraphEdge::line(coords));
    }

    #[must_use]
    pub fn has_too_few_points(&self) -> bool {
        self.too_few_points.is_some()
    }

    /// First coordinate of the first component with too few points.
    #[must_use]
    pub fn invalid_point(&self) -> Option<Coordinate> {
        self.too_few_points
    }

    #[must_use]
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    #[must_use]
    pub fn find_edge(&self, id: RingId) -> Option<&GraphEdge> {
        self.rings.get(&id).map(|&i| &self.edges[i])
    }

    /// Whether `coordinate` is a noding point of ring `id`.
    #[must_use]
    pub fn is_node_of(&self, id: RingId, coordinate: &Coordinate) -> bool {
        self.find_edge(id)
            .is_some_and(|e| e.intersections.is_intersection(coordinate))
    }

    /// Nodes every edge against every other edge and itself.
    ///
    /// Candidate segment pairs come from an envelope index, so only pairs
    /// whose envelopes overlap are intersected. Afterwards each edge's
    /// intersection list also holds its endpoints.
    pub fn compute_self_nodes(&mut self) -> SelfNodingSummary {
        let mut builder = StrTreeBuilder::new();
        for (e, edge) in self.edges.iter().enumerate() {
            for (s, pair) in edge.coords.windows(2).enumerate() {
                builder.insert(
                    Envelope::from_segment(&pair[0], &pair[1]),
                    SegmentRef {
                        edge: e,
                        segment: s,
                    },
                );
            }
        }
        let tree = builder.build();

        let mut intersector = SegmentIntersector::new();
        for a in tree.items() {
            let ea = &self.edges[a.edge].coords;
            let env = Envelope::from_segment(&ea[a.segment], &ea[a.segment + 1]);
            let candidates: Vec<SegmentRef> = tree
                .query(&env)
                .into_iter()
                .filter(|b| *b > a)
                .copied()
                .collect();
            for b in candidates {
                intersector.process(&mut self.edges, *a, b);
            }
        }

        for edge in &mut self.edges {
            edge.intersections.add_endpoints(&edge.coords);
        }

        let summary = intersector.summary();
        tracing::trace!(
            edges = self.edges.len(),
            segment_tests = intersector.num_tests(),
            has_intersection = summary.has_intersection,
            "self-noding complete"
        );
        summary
    }

    /// Loads the noded rings selected by `include` into a planar graph.
    ///
    /// Every piece between consecutive noded coordinates becomes one edge;
    /// each direction carries the [`Label`] of the ring it came from, seen
    /// along that direction.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphError`] from edge insertion; noded coordinates are
    /// distinct so this only fails on non-finite input.
    pub fn to_planar_graph(
        &self,
        include: impl Fn(RingId) -> bool,
    ) -> Result<PlanarGraph<Label>, GraphError> {
        let mut graph = PlanarGraph::new();
        for edge in &self.edges {
            let Some(id) = edge.ring else {
                continue;
            };
            if !include(id) {
                continue;
            }
            let label = Label::for_ring(edge.interior_on_left);
            for piece in edge.noded_coordinates().windows(2) {
                let from = graph.add_node(piece[0]);
                let to = graph.add_node(piece[1]);
                graph.add_edge(from, to, label, label.flip())?;
            }
        }
        Ok(graph)
    }
}
