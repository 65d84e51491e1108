use crate::geometry::{Coordinate, Geometry};
use crate::math::CommonBits;

/// Removes the leading bits shared by all coordinates of a set of geometries.
///
/// Translating geometries so the shared high-order bits become zero leaves
/// more mantissa for the bits that differ, which improves the robustness of
/// later computations. [`add_common_bits`](Self::add_common_bits) undoes the
/// translation.
#[derive(Debug, Clone, Default)]
pub struct CommonBitsRemover {
    x: CommonBits,
    y: CommonBits,
}

impl CommonBitsRemover {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds every coordinate of `geometry` into the common bits.
    pub fn add(&mut self, geometry: &Geometry) {
        for c in geometry.coordinates() {
            self.x.add(c.x);
            self.y.add(c.y);
        }
        tracing::debug!(common = %self.common_coordinate(), "common bits updated");
    }

    /// The coordinate made of the common bits of each axis.
    #[must_use]
    pub fn common_coordinate(&self) -> Coordinate {
        Coordinate::new(self.x.common(), self.y.common())
    }

    /// Translates `geometry` by the negated common coordinate.
    pub fn remove_common_bits(&self, geometry: &mut Geometry) {
        let common = self.common_coordinate();
        if common.x == 0.0 && common.y == 0.0 {
            return;
        }
        geometry.apply_coordinates_mut(|c| *c = c.translated(-common.x, -common.y));
    }

    /// Translates `geometry` back by the common coordinate.
    pub fn add_common_bits(&self, geometry: &mut Geometry) {
        let common = self.common_coordinate();
        geometry.apply_coordinates_mut(|c| *c = c.translated(common.x, common.y));
    }
}
