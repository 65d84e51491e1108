use std::cmp::Ordering;

use crate::geometry::Coordinate;

/// A noding point on an edge, located by segment index and distance along
/// that segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeIntersection {
    pub coordinate: Coordinate,
    pub segment_index: usize,
    pub dist: f64,
}

impl EdgeIntersection {
    fn compare_position(&self, segment_index: usize, dist: f64) -> Ordering {
        self.segment_index
            .cmp(&segment_index)
            .then_with(|| self.dist.total_cmp(&dist))
    }
}

/// The noding points of one edge, ordered along the edge.
///
/// Two entries at the same segment index and distance are the same point;
/// only the first is kept.
#[derive(Debug, Clone, Default)]
pub struct EdgeIntersectionList {
    entries: Vec<EdgeIntersection>,
}

impl EdgeIntersectionList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a point unless one already sits at that position.
    ///
    /// Returns `true` if the point was new.
    pub fn add(&mut self, coordinate: Coordinate, segment_index: usize, dist: f64) -> bool {
        match self
            .entries
            .binary_search_by(|e| e.compare_position(segment_index, dist))
        {
            Ok(_) => false,
            Err(pos) => {
                self.entries.insert(
                    pos,
                    EdgeIntersection {
                        coordinate,
                        segment_index,
                        dist,
                    },
                );
                true
            }
        }
    }

    /// Adds the first and last points of `coords`.
    ///
    /// The last point is recorded at segment index `len - 1`, past the final
    /// real segment.
    pub fn add_endpoints(&mut self, coords: &[Coordinate]) {
        let (Some(first), Some(last)) = (coords.first(), coords.last()) else {
            return;
        };
        self.add(*first, 0, 0.0);
        self.add(*last, coords.len() - 1, 0.0);
    }

    /// Whether `coordinate` is one of the recorded points.
    #[must_use]
    pub fn is_intersection(&self, coordinate: &Coordinate) -> bool {
        self.entries.iter().any(|e| e.coordinate.equals_2d(coordinate))
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeIntersection> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_ordered_and_deduplicated() {
        let mut list = EdgeIntersectionList::new();
        assert!(list.add(Coordinate::new(2.0, 0.0), 1, 0.5));
        assert!(list.add(Coordinate::new(1.0, 0.0), 0, 1.0));
        assert!(list.add(Coordinate::new(1.5, 0.0), 1, 0.25));
        assert!(!list.add(Coordinate::new(9.0, 9.0), 1, 0.5));

        let order: Vec<(usize, f64)> = list.iter().map(|e| (e.segment_index, e.dist)).collect();
        assert_eq!(order, vec![(0, 1.0), (1, 0.25), (1, 0.5)]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn endpoints_are_added_at_both_ends() {
        let coords = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(1.0, 1.0),
        ];
        let mut list = EdgeIntersectionList::new();
        list.add(Coordinate::new(1.0, 0.5), 1, 0.5);
        list.add_endpoints(&coords);
        let first = list.iter().next().map(|e| (e.segment_index, e.coordinate));
        let last = list.iter().last().map(|e| (e.segment_index, e.coordinate));
        assert_eq!(first, Some((0, Coordinate::new(0.0, 0.0))));
        assert_eq!(last, Some((2, Coordinate::new(1.0, 1.0))));
        assert!(list.is_intersection(&Coordinate::new(1.0, 0.5)));
        assert!(!list.is_intersection(&Coordinate::new(1.0, 0.0)));
    }

    #[test]
    fn empty_coordinates_add_nothing() {
        let mut list = EdgeIntersectionList::new();
        list.add_endpoints(&[]);
        assert!(list.is_empty());
    }
}
