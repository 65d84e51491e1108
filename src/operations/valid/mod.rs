//! Topological validity of Simple Features geometries.
//!
//! [`IsValidOp`] runs an ordered sequence of checks and reports the first
//! problem found as a [`TopologyValidationError`]. Checks that need the
//! geometry's structure work on a self-noded
//! [`GeometryGraph`](crate::geomgraph::GeometryGraph).

mod connected_interior;
mod consistent_area;
mod nested_ring;
mod nested_shell;

use std::cell::OnceCell;
use std::fmt;

use crate::error::Result;
use crate::geometry::{CoordKey, Coordinate, Geometry, LinearRing, Polygon};
use crate::geomgraph::{GeometryGraph, RingId, SelfNodingSummary};
use crate::math::{locate_point_in_ring, Location};

use consistent_area::{check_consistent_area, AreaInconsistency};
use nested_ring::IndexedNestedRingTester;

/// The kinds of topology error, each with a fixed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopologyErrorKind {
    InvalidCoordinate,
    RingNotClosed,
    TooFewPoints,
    RingSelfIntersection,
    SelfIntersection,
    DuplicateRings,
    HoleOutsideShell,
    NestedHoles,
    NestedShells,
    DisconnectedInteriors,
}

impl TopologyErrorKind {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidCoordinate => "Invalid Coordinate",
            Self::RingNotClosed => "Ring is not closed",
            Self::TooFewPoints => "Too few distinct points in geometry component",
            Self::RingSelfIntersection => "Ring Self-intersection",
            Self::SelfIntersection => "Self-intersection",
            Self::DuplicateRings => "Duplicate Rings",
            Self::HoleOutsideShell => "Hole lies outside shell",
            Self::NestedHoles => "Holes are nested",
            Self::NestedShells => "Nested shells",
            Self::DisconnectedInteriors => "Interior is disconnected",
        }
    }
}

impl fmt::Display for TopologyErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Why a geometry is invalid, and where.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopologyValidationError {
    kind: TopologyErrorKind,
    location: Option<Coordinate>,
}

impl TopologyValidationError {
    #[must_use]
    pub fn new(kind: TopologyErrorKind, location: Option<Coordinate>) -> Self {
        Self { kind, location }
    }

    fn at(kind: TopologyErrorKind, location: Coordinate) -> Self {
        Self::new(kind, Some(location))
    }

    #[must_use]
    pub fn kind(&self) -> TopologyErrorKind {
        self.kind
    }

    /// A point at or near the problem.
    #[must_use]
    pub fn location(&self) -> Option<Coordinate> {
        self.location
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

impl fmt::Display for TopologyValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(pt) => write!(f, "{} at or near point ({}, {})", self.message(), pt.x, pt.y),
            None => f.write_str(self.message()),
        }
    }
}

type Check = Result<Option<TopologyValidationError>>;

/// Tests a geometry for topological validity.
///
/// The result is computed on first request and cached.
///
/// ```
/// use topolis::geometry::{Geometry, LinearRing, Polygon};
/// use topolis::operations::valid::{IsValidOp, TopologyErrorKind};
///
/// let shell = LinearRing::from_xy(&[(0.0, 0.0), (4.0, 4.0), (4.0, 0.0), (0.0, 4.0), (0.0, 0.0)]);
/// let bow_tie: Geometry = Polygon::new(shell, vec![]).into();
/// let op = IsValidOp::new(&bow_tie);
/// let err = op.validation_error().unwrap().unwrap();
/// assert_eq!(err.kind(), TopologyErrorKind::RingSelfIntersection);
/// assert_eq!(err.to_string(), "Ring Self-intersection at or near point (2, 2)");
/// ```
#[derive(Debug)]
pub struct IsValidOp<'a> {
    geometry: &'a Geometry,
    self_touching_ring_forming_hole_valid: bool,
    result: OnceCell<Option<TopologyValidationError>>,
}

impl<'a> IsValidOp<'a> {
    #[must_use]
    pub fn new(geometry: &'a Geometry) -> Self {
        Self {
            geometry,
            self_touching_ring_forming_hole_valid: false,
            result: OnceCell::new(),
        }
    }

    /// Accepts polygon rings that touch themselves to enclose an inverted
    /// hole. Standalone rings are always checked.
    #[must_use]
    pub fn with_self_touching_ring_forming_hole_valid(mut self, valid: bool) -> Self {
        self.self_touching_ring_forming_hole_valid = valid;
        self
    }

    #[must_use]
    pub fn is_self_touching_ring_forming_hole_valid(&self) -> bool {
        self.self_touching_ring_forming_hole_valid
    }

    /// Changes the option and discards any cached result.
    pub fn set_self_touching_ring_forming_hole_valid(&mut self, valid: bool) {
        self.self_touching_ring_forming_hole_valid = valid;
        self.result.take();
    }

    /// Whether a coordinate has finite X and Y.
    #[must_use]
    pub fn is_valid_coordinate(coordinate: &Coordinate) -> bool {
        coordinate.x.is_finite() && coordinate.y.is_finite()
    }

    /// # Errors
    ///
    /// See [`validation_error`](Self::validation_error).
    pub fn is_valid(&self) -> Result<bool> {
        Ok(self.validation_error()?.is_none())
    }

    /// The first validity problem found, or `None` for a valid geometry.
    ///
    /// # Errors
    ///
    /// Returns an error only when an internal precondition fails, never for
    /// an invalid geometry.
    pub fn validation_error(&self) -> Result<Option<TopologyValidationError>> {
        if let Some(cached) = self.result.get() {
            return Ok(*cached);
        }
        let result = self.check_geometry(self.geometry)?;
        if let Some(err) = &result {
            tracing::debug!(kind = ?err.kind(), location = ?err.location(), "geometry is invalid");
        }
        Ok(*self.result.get_or_init(|| result))
    }

    fn check_geometry(&self, geometry: &Geometry) -> Check {
        match geometry {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Ok(check_coordinates(geometry)),
            Geometry::LineString(_) | Geometry::MultiLineString(_) => {
                Ok(check_coordinates(geometry).or_else(|| check_too_few_points(geometry)))
            }
            Geometry::LinearRing(ring) => Ok(check_linear_ring(geometry, ring)),
            Geometry::Polygon(polygon) => self.check_areal(geometry, std::slice::from_ref(polygon)),
            Geometry::MultiPolygon(polygons) => self.check_areal(geometry, polygons),
            Geometry::GeometryCollection(members) => {
                for member in members {
                    if let Some(err) = self.check_geometry(member)? {
                        return Ok(Some(err));
                    }
                }
                Ok(None)
            }
        }
    }

    /// Polygon and multipolygon checks. `polygons` are indexed as in the
    /// graph built from `geometry`.
    fn check_areal(&self, geometry: &Geometry, polygons: &[Polygon]) -> Check {
        if let Some(err) = check_coordinates(geometry) {
            return Ok(Some(err));
        }
        for polygon in polygons {
            if let Some(err) = polygon.rings().find_map(check_closed) {
                return Ok(Some(err));
            }
        }

        let mut graph = GeometryGraph::new(geometry);
        if let Some(pt) = graph.invalid_point() {
            return Ok(Some(TopologyValidationError::at(TopologyErrorKind::TooFewPoints, pt)));
        }
        let summary = graph.compute_self_nodes();

        if !self.self_touching_ring_forming_hole_valid {
            if let Some(err) = check_rings_not_self_intersecting(&graph) {
                return Ok(Some(err));
            }
        }
        for (i, polygon) in polygons.iter().enumerate() {
            if let Some(err) = check_holes_in_shell(&graph, i, polygon) {
                return Ok(Some(err));
            }
        }
        if let Some(err) = check_area(&graph, &summary)? {
            return Ok(Some(err));
        }
        for (i, polygon) in polygons.iter().enumerate() {
            if let Some(err) = check_holes_not_nested(&graph, i, polygon) {
                return Ok(Some(err));
            }
        }
        if polygons.len() > 1 {
            if let Some(pt) = nested_shell::find_nested_shell(&graph, polygons)? {
                return Ok(Some(TopologyValidationError::at(TopologyErrorKind::NestedShells, pt)));
            }
        }
        for i in 0..polygons.len() {
            if let Some(pt) = connected_interior::find_disconnected_interior(&graph, i)? {
                return Ok(Some(TopologyValidationError::at(
                    TopologyErrorKind::DisconnectedInteriors,
                    pt,
                )));
            }
        }
        Ok(None)
    }
}

/// A standalone ring. Self-touching is only acceptable inside a polygon, so
/// the ring is always checked for self-intersection.
fn check_linear_ring(geometry: &Geometry, ring: &LinearRing) -> Option<TopologyValidationError> {
    if let Some(err) = check_coordinates(geometry)
        .or_else(|| check_closed(ring))
        .or_else(|| check_too_few_points(geometry))
    {
        return Some(err);
    }
    let mut graph = GeometryGraph::new(geometry);
    graph.compute_self_nodes();
    check_rings_not_self_intersecting(&graph)
}

/// A ring passing through the same point twice.
fn check_rings_not_self_intersecting(graph: &GeometryGraph) -> Option<TopologyValidationError> {
    graph
        .edges()
        .iter()
        .filter(|edge| edge.ring_id().is_some())
        .find_map(|edge| {
            let mut seen = std::collections::BTreeSet::new();
            edge.intersections()
                .iter()
                .skip(1)
                .find(|ei| !seen.insert(CoordKey::new(ei.coordinate)))
                .map(|ei| {
                    TopologyValidationError::at(
                        TopologyErrorKind::RingSelfIntersection,
                        ei.coordinate,
                    )
                })
        })
}

fn check_coordinates(geometry: &Geometry) -> Option<TopologyValidationError> {
    geometry
        .coordinates()
        .find(|c| !IsValidOp::is_valid_coordinate(c))
        .map(|c| TopologyValidationError::at(TopologyErrorKind::InvalidCoordinate, *c))
}

fn check_closed(ring: &LinearRing) -> Option<TopologyValidationError> {
    if ring.is_empty() || ring.is_closed() {
        return None;
    }
    Some(TopologyValidationError::at(
        TopologyErrorKind::RingNotClosed,
        ring.coords[0],
    ))
}

fn check_too_few_points(geometry: &Geometry) -> Option<TopologyValidationError> {
    GeometryGraph::new(geometry)
        .invalid_point()
        .map(|pt| TopologyValidationError::at(TopologyErrorKind::TooFewPoints, pt))
}

/// Every hole vertex that is not a shell node must lie inside the shell.
fn check_holes_in_shell(
    graph: &GeometryGraph,
    polygon_index: usize,
    polygon: &Polygon,
) -> Option<TopologyValidationError> {
    let shell_id = RingId::shell(polygon_index);
    for (h, hole) in polygon.holes.iter().enumerate() {
        if hole.is_empty() {
            continue;
        }
        let Some(shell) = graph.find_edge(shell_id) else {
            return Some(TopologyValidationError::at(
                TopologyErrorKind::HoleOutsideShell,
                hole.coords[0],
            ));
        };
        let Some(hole_edge) = graph.find_edge(RingId::hole(polygon_index, h)) else {
            continue;
        };
        let outside = hole_edge.coordinates().iter().find(|pt| {
            !graph.is_node_of(shell_id, pt)
                && locate_point_in_ring(pt, shell.coordinates()) == Location::Exterior
        });
        if let Some(pt) = outside {
            return Some(TopologyValidationError::at(
                TopologyErrorKind::HoleOutsideShell,
                *pt,
            ));
        }
    }
    None
}

fn check_area(graph: &GeometryGraph, summary: &SelfNodingSummary) -> Check {
    Ok(check_consistent_area(graph, summary)?.map(|found| match found {
        AreaInconsistency::SelfIntersection(pt) => {
            TopologyValidationError::at(TopologyErrorKind::SelfIntersection, pt)
        }
        AreaInconsistency::DuplicateRings(pt) => {
            TopologyValidationError::at(TopologyErrorKind::DuplicateRings, pt)
        }
    }))
}

fn check_holes_not_nested(
    graph: &GeometryGraph,
    polygon_index: usize,
    polygon: &Polygon,
) -> Option<TopologyValidationError> {
    let mut tester = IndexedNestedRingTester::new(graph);
    for h in 0..polygon.holes.len() {
        tester.add(RingId::hole(polygon_index, h));
    }
    tester
        .find_nested_point()
        .map(|pt| TopologyValidationError::at(TopologyErrorKind::NestedHoles, pt))
}

impl Geometry {
    /// Whether the geometry is topologically valid, with default options.
    ///
    /// # Errors
    ///
    /// See [`IsValidOp::validation_error`].
    pub fn is_valid(&self) -> Result<bool> {
        IsValidOp::new(self).is_valid()
    }
}
