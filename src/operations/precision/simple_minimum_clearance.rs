use crate::geometry::{Coordinate, Geometry};
use crate::math::distance_2d::closest_point_on_segment;

/// Minimum clearance of a geometry by exhaustive search.
///
/// The clearance is the smallest non-zero distance between a vertex and
/// either another vertex or a segment not containing it. Every vertex is
/// tested against everything, so this is quadratic in the vertex count.
#[derive(Debug, Clone)]
pub struct SimpleMinimumClearance<'a> {
    geometry: &'a Geometry,
}

/// Result of a clearance search.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Clearance {
    distance: f64,
    line: Option<[Coordinate; 2]>,
}

impl<'a> SimpleMinimumClearance<'a> {
    #[must_use]
    pub fn new(geometry: &'a Geometry) -> Self {
        Self { geometry }
    }

    /// The minimum clearance, or `f64::MAX` if no pair of distinct
    /// features exists.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.compute().distance
    }

    /// The vertex and the nearest point realising the clearance.
    #[must_use]
    pub fn line(&self) -> Option<[Coordinate; 2]> {
        self.compute().line
    }

    fn compute(&self) -> Clearance {
        let mut best = Clearance {
            distance: f64::MAX,
            line: None,
        };
        let mut sequences: Vec<&[Coordinate]> = Vec::new();
        collect_sequences(self.geometry, &mut sequences);

        for p in sequences.iter().flat_map(|seq| seq.iter()) {
            for seq in &sequences {
                for (i, q) in seq.iter().enumerate() {
                    let d = p.distance(q);
                    if d > 0.0 && d < best.distance {
                        best = Clearance {
                            distance: d,
                            line: Some([*p, *q]),
                        };
                    }
                    if i == 0 {
                        continue;
                    }
                    let a = &seq[i - 1];
                    if p.equals_2d(a) || p.equals_2d(q) {
                        continue;
                    }
                    let nearest = closest_point_on_segment(p, a, q);
                    let d = p.distance(&nearest);
                    if d > 0.0 && d < best.distance {
                        best = Clearance {
                            distance: d,
                            line: Some([*p, nearest]),
                        };
                    }
                }
            }
        }
        best
    }
}

fn collect_sequences<'g>(geometry: &'g Geometry, out: &mut Vec<&'g [Coordinate]>) {
    match geometry {
        Geometry::Point(p) => {
            if let Some(c) = p {
                out.push(std::slice::from_ref(c));
            }
        }
        Geometry::LineString(line) => out.push(&line.coords),
        Geometry::LinearRing(ring) => out.push(&ring.coords),
        Geometry::Polygon(poly) => out.extend(poly.rings().map(|r| r.coords.as_slice())),
        Geometry::MultiPoint(points) => out.push(points),
        Geometry::MultiLineString(lines) => out.extend(lines.iter().map(|l| l.coords.as_slice())),
        Geometry::MultiPolygon(polys) => out.extend(
            polys
                .iter()
                .flat_map(|p| p.rings().map(|r| r.coords.as_slice())),
        ),
        Geometry::GeometryCollection(members) => {
            for member in members {
                collect_sequences(member, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{LineString, LinearRing, Polygon};
    use approx::assert_relative_eq;

    #[test]
    fn unit_square_has_clearance_one() {
        let square: Geometry = Polygon::new(
            LinearRing::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
            vec![],
        )
        .into();
        let mc = SimpleMinimumClearance::new(&square);
        assert_relative_eq!(mc.distance(), 1.0);
        assert!(mc.line().is_some());
    }

    #[test]
    fn vertex_close_to_a_segment() {
        let line: Geometry = LineString::from_xy(&[(0.0, 0.0), (10.0, 0.0), (5.0, 0.1)]).into();
        let mc = SimpleMinimumClearance::new(&line);
        assert_relative_eq!(mc.distance(), 0.1, epsilon = 1e-12);
        let [from, to] = mc.line().unwrap_or_default();
        assert_eq!(from, Coordinate::new(5.0, 0.1));
        assert_relative_eq!(to.x, 5.0);
        assert_relative_eq!(to.y, 0.0);
    }

    #[test]
    fn single_point_has_no_clearance() {
        let point = Geometry::Point(Some(Coordinate::new(1.0, 1.0)));
        let mc = SimpleMinimumClearance::new(&point);
        assert_eq!(mc.distance(), f64::MAX);
        assert_eq!(mc.line(), None);
    }
}
