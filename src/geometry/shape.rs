use super::{Coordinate, Envelope};

/// An ordered sequence of vertices forming a path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString {
    pub coords: Vec<Coordinate>,
}

impl LineString {
    #[must_use]
    pub fn new(coords: Vec<Coordinate>) -> Self {
        Self { coords }
    }

    /// Builds a line string from `(x, y)` pairs.
    #[must_use]
    pub fn from_xy(points: &[(f64, f64)]) -> Self {
        Self::new(points.iter().copied().map(Coordinate::from).collect())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Returns `true` if the first and last vertices coincide.
    ///
    /// An empty line is not closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.coords.first(), self.coords.last()) {
            (Some(first), Some(last)) => first.equals_2d(last),
            _ => false,
        }
    }
}

/// A closed line string used as a polygon boundary.
///
/// Closure is not enforced on construction; checking it is part of validation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearRing {
    pub coords: Vec<Coordinate>,
}

impl LinearRing {
    #[must_use]
    pub fn new(coords: Vec<Coordinate>) -> Self {
        Self { coords }
    }

    /// Builds a ring from `(x, y)` pairs.
    #[must_use]
    pub fn from_xy(points: &[(f64, f64)]) -> Self {
        Self::new(points.iter().copied().map(Coordinate::from).collect())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Returns `true` if the ring is empty or its ends coincide.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.coords.first(), self.coords.last()) {
            (Some(first), Some(last)) => first.equals_2d(last),
            _ => true,
        }
    }

    #[must_use]
    pub fn envelope(&self) -> Option<Envelope> {
        Envelope::from_coordinates(&self.coords)
    }
}

/// A shell with zero or more holes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub shell: LinearRing,
    pub holes: Vec<LinearRing>,
}

impl Polygon {
    #[must_use]
    pub fn new(shell: LinearRing, holes: Vec<LinearRing>) -> Self {
        Self { shell, holes }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shell.is_empty()
    }

    /// Iterates the shell followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.shell).chain(self.holes.iter())
    }

    /// Returns ring `index`, where 0 is the shell and `i + 1` is hole `i`.
    #[must_use]
    pub fn ring(&self, index: usize) -> Option<&LinearRing> {
        if index == 0 {
            Some(&self.shell)
        } else {
            self.holes.get(index - 1)
        }
    }
}

/// Kind tag of a [`Geometry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryType {
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

/// The shapes understood by the validity engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single position; `None` is the empty point.
    Point(Option<Coordinate>),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(Vec<Coordinate>),
    MultiLineString(Vec<LineString>),
    MultiPolygon(Vec<Polygon>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    #[must_use]
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Self::Point(_) => GeometryType::Point,
            Self::LineString(_) => GeometryType::LineString,
            Self::LinearRing(_) => GeometryType::LinearRing,
            Self::Polygon(_) => GeometryType::Polygon,
            Self::MultiPoint(_) => GeometryType::MultiPoint,
            Self::MultiLineString(_) => GeometryType::MultiLineString,
            Self::MultiPolygon(_) => GeometryType::MultiPolygon,
            Self::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// Returns `true` if the geometry has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coordinates().next().is_none()
    }

    /// Iterates every vertex of the geometry in storage order.
    #[must_use]
    pub fn coordinates(&self) -> Box<dyn Iterator<Item = &Coordinate> + '_> {
        match self {
            Self::Point(p) => Box::new(p.iter()),
            Self::LineString(line) => Box::new(line.coords.iter()),
            Self::LinearRing(ring) => Box::new(ring.coords.iter()),
            Self::Polygon(poly) => Box::new(poly.rings().flat_map(|r| r.coords.iter())),
            Self::MultiPoint(points) => Box::new(points.iter()),
            Self::MultiLineString(lines) => Box::new(lines.iter().flat_map(|l| l.coords.iter())),
            Self::MultiPolygon(polys) => Box::new(
                polys
                    .iter()
                    .flat_map(|p| p.rings().flat_map(|r| r.coords.iter())),
            ),
            Self::GeometryCollection(members) => {
                Box::new(members.iter().flat_map(Geometry::coordinates))
            }
        }
    }

    /// Visits every vertex sequence mutably.
    ///
    /// Each line, ring or point set is passed as one slice so callers can
    /// work with neighbouring vertices.
    pub fn apply_sequences_mut(&mut self, f: &mut impl FnMut(&mut [Coordinate])) {
        match self {
            Self::Point(p) => {
                if let Some(c) = p.as_mut() {
                    f(std::slice::from_mut(c));
                }
            }
            Self::LineString(line) => f(&mut line.coords),
            Self::LinearRing(ring) => f(&mut ring.coords),
            Self::Polygon(poly) => apply_polygon(poly, f),
            Self::MultiPoint(points) => f(points),
            Self::MultiLineString(lines) => {
                for line in lines {
                    f(&mut line.coords);
                }
            }
            Self::MultiPolygon(polys) => {
                for poly in polys {
                    apply_polygon(poly, f);
                }
            }
            Self::GeometryCollection(members) => {
                for member in members {
                    member.apply_sequences_mut(f);
                }
            }
        }
    }

    /// Visits every vertex mutably.
    pub fn apply_coordinates_mut(&mut self, mut f: impl FnMut(&mut Coordinate)) {
        self.apply_sequences_mut(&mut |seq: &mut [Coordinate]| seq.iter_mut().for_each(&mut f));
    }

    /// Visits every vertex sequence.
    pub fn apply_sequences(&self, f: &mut impl FnMut(&[Coordinate])) {
        match self {
            Self::Point(p) => {
                if let Some(c) = p.as_ref() {
                    f(std::slice::from_ref(c));
                }
            }
            Self::LineString(line) => f(&line.coords),
            Self::LinearRing(ring) => f(&ring.coords),
            Self::Polygon(poly) => poly.rings().for_each(|r| f(&r.coords)),
            Self::MultiPoint(points) => f(points),
            Self::MultiLineString(lines) => lines.iter().for_each(|l| f(&l.coords)),
            Self::MultiPolygon(polys) => polys
                .iter()
                .for_each(|p| p.rings().for_each(|r| f(&r.coords))),
            Self::GeometryCollection(members) => {
                for member in members {
                    member.apply_sequences(f);
                }
            }
        }
    }

    /// Bounding envelope, `None` for empty geometries.
    #[must_use]
    pub fn envelope(&self) -> Option<Envelope> {
        Envelope::from_coordinates(self.coordinates())
    }
}

fn apply_polygon(poly: &mut Polygon, f: &mut impl FnMut(&mut [Coordinate])) {
    f(&mut poly.shell.coords);
    for hole in &mut poly.holes {
        f(&mut hole.coords);
    }
}

impl From<Polygon> for Geometry {
    fn from(p: Polygon) -> Self {
        Self::Polygon(p)
    }
}

impl From<LineString> for Geometry {
    fn from(l: LineString) -> Self {
        Self::LineString(l)
    }
}

impl From<LinearRing> for Geometry {
    fn from(r: LinearRing) -> Self {
        Self::LinearRing(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> LinearRing {
        LinearRing::from_xy(&[
            (x0, y0),
            (x0 + size, y0),
            (x0 + size, y0 + size),
            (x0, y0 + size),
            (x0, y0),
        ])
    }

    #[test]
    fn polygon_coordinates_cover_all_rings() {
        let poly = Polygon::new(square(0.0, 0.0, 4.0), vec![square(1.0, 1.0, 1.0)]);
        let g = Geometry::from(poly);
        assert_eq!(g.coordinates().count(), 10);
        assert_eq!(g.envelope(), Some(Envelope::new(0.0, 4.0, 0.0, 4.0)));
    }

    #[test]
    fn empty_geometries() {
        assert!(Geometry::Point(None).is_empty());
        assert!(Geometry::GeometryCollection(vec![]).is_empty());
        assert!(Geometry::Polygon(Polygon::default()).is_empty());
        assert!(Geometry::Point(None).envelope().is_none());
    }

    #[test]
    fn apply_coordinates_mut_translates_nested_members() {
        let mut g = Geometry::GeometryCollection(vec![
            Geometry::Point(Some(Coordinate::new(1.0, 1.0))),
            Geometry::MultiPolygon(vec![Polygon::new(square(0.0, 0.0, 1.0), vec![])]),
        ]);
        g.apply_coordinates_mut(|c| *c = c.translated(10.0, 0.0));
        assert!(g.coordinates().all(|c| c.x >= 10.0));
    }

    #[test]
    fn ring_closure() {
        assert!(square(0.0, 0.0, 1.0).is_closed());
        assert!(LinearRing::default().is_closed());
        assert!(!LinearRing::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).is_closed());
        assert!(!LineString::default().is_closed());
    }

    #[test]
    fn ring_index_zero_is_shell() {
        let poly = Polygon::new(square(0.0, 0.0, 4.0), vec![square(1.0, 1.0, 1.0)]);
        assert_eq!(poly.ring(0), Some(&poly.shell));
        assert_eq!(poly.ring(1), poly.holes.first());
        assert!(poly.ring(2).is_none());
    }
}
