use crate::geometry::{Coordinate, Geometry, PrecisionModel};

/// Snaps coordinates in place to a [`PrecisionModel`].
///
/// Only X and Y are rounded. The result may be topologically invalid (for
/// example a thin polygon can collapse); callers validate afterwards.
#[derive(Debug, Clone, Copy)]
pub struct CoordinatePrecisionReducer {
    model: PrecisionModel,
}

impl CoordinatePrecisionReducer {
    #[must_use]
    pub fn new(model: PrecisionModel) -> Self {
        Self { model }
    }

    #[must_use]
    pub fn model(&self) -> PrecisionModel {
        self.model
    }

    pub fn reduce_coordinates(&self, coords: &mut [Coordinate]) {
        for c in coords {
            self.model.make_precise_coordinate(c);
        }
    }

    pub fn reduce(&self, geometry: &mut Geometry) {
        geometry.apply_coordinates_mut(|c| self.model.make_precise_coordinate(c));
    }
}
