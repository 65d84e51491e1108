pub mod error;
pub mod geometry;
pub mod geomgraph;
pub mod index;
pub mod math;
pub mod operations;
pub mod planargraph;

pub use error::{Result, TopolisError};
pub use operations::valid::{IsValidOp, TopologyErrorKind, TopologyValidationError};
