use thiserror::Error;

use crate::geometry::Coordinate;

/// Top-level error type for the topolis engine.
///
/// These are precondition violations raised by misuse of the index, the
/// planar graph or the validity operation. They are never used to describe
/// an invalid geometry; that is the job of
/// [`TopologyValidationError`](crate::operations::valid::TopologyValidationError).
#[derive(Debug, Error)]
pub enum TopolisError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to the packed spatial index.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("node capacity must be greater than 1, got {0}")]
    InvalidNodeCapacity(usize),
}

/// Errors related to planar graph bookkeeping.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node not found in planar graph")]
    NodeNotFound,

    #[error("edge not found in planar graph")]
    EdgeNotFound,

    #[error("directed edge not found in planar graph")]
    DirectedEdgeNotFound,

    #[error("directed edge from {from} has zero-length direction")]
    DegenerateDirection { from: Coordinate },
}

/// Errors related to geometric operations.
#[derive(Debug, Error)]
pub enum OperationError {
    /// A shell and a hole have no vertex that is not a node of the other.
    ///
    /// This can only happen for identical rings, which the consistent-area
    /// check rejects earlier, so reaching it means a caller skipped that check.
    #[error("shell and hole appear to be equal (shell at {shell}, hole at {hole})")]
    ShellHoleIdentity { shell: Coordinate, hole: Coordinate },
}

/// Convenience type alias for results using [`TopolisError`].
pub type Result<T> = std::result::Result<T, TopolisError>;
