use std::cmp::Ordering;

use super::edge::EdgeId;
use super::node::NodeId;
use crate::error::GraphError;
use crate::geometry::Coordinate;
use crate::math::orientation_index;

slotmap::new_key_type! {
    /// Unique identifier for a directed edge in a planar graph.
    pub struct DirectedEdgeId;
}

/// Quadrant of a direction vector, numbered counter-clockwise from the
/// positive x axis. Axis-aligned directions fall in the quadrant that
/// starts at that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Quadrant {
    NorthEast = 0,
    NorthWest = 1,
    SouthWest = 2,
    SouthEast = 3,
}

impl Quadrant {
    /// Quadrant of the vector `(dx, dy)`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DegenerateDirection`] for the zero vector;
    /// `origin` is only used to describe the failure.
    pub fn of(dx: f64, dy: f64, origin: Coordinate) -> Result<Self, GraphError> {
        if dx == 0.0 && dy == 0.0 {
            return Err(GraphError::DegenerateDirection { from: origin });
        }
        Ok(match (dx >= 0.0, dy >= 0.0) {
            (true, true) => Self::NorthEast,
            (true, false) => Self::SouthEast,
            (false, true) => Self::NorthWest,
            (false, false) => Self::SouthWest,
        })
    }
}

/// One direction of an [`Edge`](super::Edge), leaving `from`.
///
/// The direction is fixed by the origin coordinate and a direction point,
/// which for a straight edge is the far end. `data` is the caller's payload
/// for this direction.
#[derive(Debug, Clone)]
pub struct DirectedEdge<T> {
    pub(crate) from: NodeId,
    pub(crate) to: NodeId,
    pub(crate) edge: EdgeId,
    pub(crate) sym: DirectedEdgeId,
    p0: Coordinate,
    p1: Coordinate,
    quadrant: Quadrant,
    angle: f64,
    edge_direction: bool,
    data: T,
}

impl<T> DirectedEdge<T> {
    /// Creates an unlinked directed edge from `p0` towards `direction_pt`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DegenerateDirection`] if the two points coincide.
    pub(crate) fn new(
        from: NodeId,
        to: NodeId,
        p0: Coordinate,
        direction_pt: Coordinate,
        edge_direction: bool,
        data: T,
    ) -> Result<Self, GraphError> {
        let dx = direction_pt.x - p0.x;
        let dy = direction_pt.y - p0.y;
        let quadrant = Quadrant::of(dx, dy, p0)?;
        Ok(Self {
            from,
            to,
            edge: EdgeId::default(),
            sym: DirectedEdgeId::default(),
            p0,
            p1: direction_pt,
            quadrant,
            angle: dy.atan2(dx),
            edge_direction,
            data,
        })
    }

    #[must_use]
    pub fn from_node(&self) -> NodeId {
        self.from
    }

    #[must_use]
    pub fn to_node(&self) -> NodeId {
        self.to
    }

    #[must_use]
    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    /// The opposite directed edge of the same edge.
    #[must_use]
    pub fn sym(&self) -> DirectedEdgeId {
        self.sym
    }

    /// Origin coordinate.
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        self.p0
    }

    #[must_use]
    pub fn direction_pt(&self) -> Coordinate {
        self.p1
    }

    #[must_use]
    pub fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    /// Angle of the direction in radians, in `(-π, π]`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Whether this directed edge runs the same way as its parent edge.
    #[must_use]
    pub fn edge_direction(&self) -> bool {
        self.edge_direction
    }

    #[must_use]
    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Orders directions counter-clockwise starting from the positive x axis.
    ///
    /// Quadrants are compared first; within a quadrant the robust orientation
    /// of the two direction points decides, so no trigonometry is involved.
    #[must_use]
    pub fn compare_direction(&self, other: &Self) -> Ordering {
        match self.quadrant.cmp(&other.quadrant) {
            Ordering::Equal => orientation_index(&other.p0, &other.p1, &self.p1)
                .as_i32()
                .cmp(&0),
            unequal => unequal,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn de(dx: f64, dy: f64) -> DirectedEdge<()> {
        DirectedEdge::new(
            NodeId::default(),
            NodeId::default(),
            Coordinate::new(0.0, 0.0),
            Coordinate::new(dx, dy),
            true,
            (),
        )
        .unwrap()
    }

    #[test]
    fn quadrants() {
        let origin = Coordinate::new(0.0, 0.0);
        assert_eq!(Quadrant::of(1.0, 0.0, origin).unwrap(), Quadrant::NorthEast);
        assert_eq!(Quadrant::of(0.0, 1.0, origin).unwrap(), Quadrant::NorthEast);
        assert_eq!(Quadrant::of(-1.0, 0.0, origin).unwrap(), Quadrant::NorthWest);
        assert_eq!(Quadrant::of(-1.0, -1.0, origin).unwrap(), Quadrant::SouthWest);
        assert_eq!(Quadrant::of(0.0, -1.0, origin).unwrap(), Quadrant::SouthEast);
        assert!(matches!(
            Quadrant::of(0.0, 0.0, origin),
            Err(GraphError::DegenerateDirection { .. })
        ));
    }

    #[test]
    fn direction_order_is_counter_clockwise() {
        let east = de(1.0, 0.0);
        let north_east = de(1.0, 1.0);
        let north = de(0.0, 1.0);
        let west = de(-1.0, 0.0);
        let south = de(0.0, -1.0);
        assert_eq!(east.compare_direction(&north_east), Ordering::Less);
        assert_eq!(north_east.compare_direction(&north), Ordering::Less);
        assert_eq!(north.compare_direction(&west), Ordering::Less);
        assert_eq!(south.compare_direction(&west), Ordering::Greater);
        assert_eq!(east.compare_direction(&de(2.0, 0.0)), Ordering::Equal);
    }

    #[test]
    fn angle_matches_direction() {
        approx::assert_relative_eq!(de(0.0, 1.0).angle(), std::f64::consts::FRAC_PI_2);
        approx::assert_relative_eq!(de(-1.0, 0.0).angle(), std::f64::consts::PI);
    }
}
