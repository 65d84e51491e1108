pub mod common_bits;
pub mod distance_2d;
pub mod line_intersector;
pub mod orientation;
pub mod ring;

pub use common_bits::CommonBits;
pub use line_intersector::{LineIntersector, SegmentIntersection};
pub use orientation::{orientation_index, Orientation};
pub use ring::{is_ccw, is_point_in_ring, locate_point_in_ring, signed_area, Location};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;
