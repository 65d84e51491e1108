pub mod coordinate;
pub mod envelope;
pub mod interval;
pub mod precision_model;
pub mod shape;

pub use coordinate::{CoordKey, Coordinate};
pub use envelope::Envelope;
pub use interval::Interval;
pub use precision_model::PrecisionModel;
pub use shape::{Geometry, GeometryType, LineString, LinearRing, Polygon};
