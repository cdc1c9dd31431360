//! Error types for segment queries.

use thiserror::Error;

use crate::segment::Frame;

/// Errors that can occur while building or deriving a query.
///
/// Geometric misses are never errors; they surface as empty results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntersectError {
    /// The composed transform chain has no inverse.
    #[error("transform chain from {frame:?} space is singular")]
    SingularTransform {
        /// Frame the query was expressed in.
        frame: Frame,
    },

    /// A coordinate is NaN or infinite.
    #[error("non-finite coordinate in {0}")]
    NonFiniteCoordinate(String),

    /// Start and end of the segment coincide.
    #[error("segment has zero length")]
    ZeroLengthSegment,
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, IntersectError>;
