//! Serializable query descriptors.

use segpick_math::Point3;
use serde::{Deserialize, Serialize};

use crate::error::{IntersectError, Result};
use crate::intersector::LineSegmentIntersector;
use crate::segment::Frame;

/// Description of a segment query, suitable for loading from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryConfig {
    /// Explicit segment.
    Segment {
        /// Frame of the endpoints.
        frame: Frame,
        /// Start point.
        start: [f64; 3],
        /// End point.
        end: [f64; 3],
    },
    /// Segment through `(x, y)` across the full depth of `frame`.
    Pick {
        /// Frame of the picked point.
        frame: Frame,
        /// Horizontal coordinate.
        x: f64,
        /// Vertical coordinate.
        y: f64,
    },
}

impl QueryConfig {
    /// Frame the query is expressed in.
    pub fn frame(&self) -> Frame {
        match *self {
            QueryConfig::Segment { frame, .. } | QueryConfig::Pick { frame, .. } => frame,
        }
    }

    /// Validate the descriptor.
    pub fn validate(&self) -> Result<()> {
        match *self {
            QueryConfig::Segment { start, end, .. } => {
                if start.iter().chain(end.iter()).any(|c| !c.is_finite()) {
                    return Err(IntersectError::NonFiniteCoordinate(
                        "segment endpoints".into(),
                    ));
                }
                if start == end {
                    return Err(IntersectError::ZeroLengthSegment);
                }
            }
            QueryConfig::Pick { x, y, .. } => {
                if !x.is_finite() || !y.is_finite() {
                    return Err(IntersectError::NonFiniteCoordinate(
                        "pick coordinates".into(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Validate and build the intersector.
    pub fn build(&self) -> Result<LineSegmentIntersector> {
        self.validate()?;
        Ok(match *self {
            QueryConfig::Segment { frame, start, end } => {
                LineSegmentIntersector::new(frame, Point3::from(start), Point3::from(end))
            }
            QueryConfig::Pick { frame, x, y } => LineSegmentIntersector::pick(frame, x, y),
        })
    }
}
