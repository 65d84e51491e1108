use super::Coordinate;

/// Describes the grid that coordinate values are snapped to.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PrecisionModel {
    /// Full double precision; values are left untouched.
    #[default]
    Floating,
    /// Values are rounded to single precision.
    FloatingSingle,
    /// Values are rounded to a grid of `1 / scale` units.
    ///
    /// A scale below 1 is a grid larger than one unit (scale 0.01 snaps to
    /// multiples of 100).
    Fixed { scale: f64 },
}

impl PrecisionModel {
    /// Creates a fixed model from the size of one grid cell.
    #[must_use]
    pub fn fixed_grid(grid_size: f64) -> Self {
        Self::Fixed {
            scale: 1.0 / grid_size.abs(),
        }
    }

    /// Returns `true` for the two floating variants.
    #[must_use]
    pub fn is_floating(&self) -> bool {
        !matches!(self, Self::Fixed { .. })
    }

    /// Rounds a value to this model. NaN passes through unchanged.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn make_precise(&self, value: f64) -> f64 {
        if value.is_nan() {
            return value;
        }
        match *self {
            Self::Floating => value,
            Self::FloatingSingle => f64::from(value as f32),
            Self::Fixed { scale } => {
                if scale < 1.0 {
                    let grid_size = 1.0 / scale;
                    round_half_up(value / grid_size) * grid_size
                } else {
                    round_half_up(value * scale) / scale
                }
            }
        }
    }

    /// Rounds both ordinates of a coordinate; `z` is kept as is.
    pub fn make_precise_coordinate(&self, c: &mut Coordinate) {
        c.x = self.make_precise(c.x);
        c.y = self.make_precise(c.y);
    }
}

/// Rounds towards positive infinity at the half-way point.
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}
