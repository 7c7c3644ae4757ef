use std::path::PathBuf;

use thiserror::Error;

use crate::points::PointId;

/// Convenient result alias for the spherepath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Graph mutation errors never leave the graph half-modified: a rejected call
/// behaves as if it was never made.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a route references a point that is not in the graph.
    #[error("route ({source_id},{destination}) references a missing point")]
    MissingEndpoint {
        source_id: PointId,
        destination: PointId,
    },

    /// Raised when a route would start and end at the same point.
    #[error("route source and destination must differ: ({id})")]
    SelfLoop { id: PointId },

    /// Raised when a route is cheaper than the weighted great-circle distance
    /// between its endpoints, which would make the heuristic overestimate.
    #[error(
        "route cost can't be less than weighted distance: ({source_id},{destination}) cost {cost} < {bound}"
    )]
    BelowHeuristicBound {
        source_id: PointId,
        destination: PointId,
        cost: f64,
        bound: f64,
    },

    /// Raised when the heuristic weight would become negative (or NaN).
    #[error("heuristic weight must be non-negative, got {weight}")]
    NegativeWeight { weight: f64 },

    /// Raised when a bulk record source cannot be opened or read.
    #[error("record source {path} is unavailable: {message}")]
    SourceUnavailable { path: PathBuf, message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV writer errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
