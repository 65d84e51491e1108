use super::Coordinate;

/// An axis-aligned 2D bounding box.
///
/// Always non-empty; "no envelope" is expressed as `Option<Envelope>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Envelope {
    /// Creates an envelope spanning two corner values on each axis, in any order.
    #[must_use]
    pub fn new(x1: f64, x2: f64, y1: f64, y2: f64) -> Self {
        Self {
            min_x: x1.min(x2),
            max_x: x1.max(x2),
            min_y: y1.min(y2),
            max_y: y1.max(y2),
        }
    }

    /// Degenerate envelope covering a single point.
    #[must_use]
    pub fn from_coordinate(c: &Coordinate) -> Self {
        Self::new(c.x, c.x, c.y, c.y)
    }

    /// Envelope of a segment.
    #[must_use]
    pub fn from_segment(a: &Coordinate, b: &Coordinate) -> Self {
        Self::new(a.x, b.x, a.y, b.y)
    }

    /// Envelope of a coordinate list, `None` when the list is empty.
    #[must_use]
    pub fn from_coordinates<'a>(coords: impl IntoIterator<Item = &'a Coordinate>) -> Option<Self> {
        let mut iter = coords.into_iter();
        let first = iter.next()?;
        let mut env = Self::from_coordinate(first);
        for c in iter {
            env.expand_to_include_coordinate(c);
        }
        Some(env)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn centre(&self) -> Coordinate {
        Coordinate::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns `true` if the two envelopes share at least one point.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        !(other.min_x > self.max_x
            || other.max_x < self.min_x
            || other.min_y > self.max_y
            || other.max_y < self.min_y)
    }

    /// Returns `true` if the coordinate lies inside or on the boundary.
    #[must_use]
    pub fn intersects_coordinate(&self, c: &Coordinate) -> bool {
        c.x >= self.min_x && c.x <= self.max_x && c.y >= self.min_y && c.y <= self.max_y
    }

    /// Returns `true` if `other` lies entirely within this envelope.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    /// Grows this envelope to include `other`.
    pub fn expand_to_include(&mut self, other: &Self) {
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Grows this envelope to include a coordinate.
    pub fn expand_to_include_coordinate(&mut self, c: &Coordinate) {
        self.expand_to_include(&Self::from_coordinate(c));
    }
}
