//! Segments and the reference frames they are expressed in.

use segpick_math::{Point3, Transform, Vec3};
use serde::{Deserialize, Serialize};

/// Coordinate space a segment is expressed in, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frame {
    /// Window (pixel) coordinates with depth in `[0, 1]`.
    Window,
    /// Normalized device coordinates.
    Projection,
    /// Eye space.
    View,
    /// Local space of the geometry being tested.
    Model,
}

impl Frame {
    /// Frames whose transforms lead from model space out to this frame,
    /// outermost first.
    pub fn chain(self) -> &'static [Frame] {
        match self {
            Frame::Window => &[Frame::Window, Frame::Projection, Frame::View, Frame::Model],
            Frame::Projection => &[Frame::Projection, Frame::View, Frame::Model],
            Frame::View => &[Frame::View, Frame::Model],
            Frame::Model => &[Frame::Model],
        }
    }
}

/// Directed line segment tagged with its frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point.
    pub start: Point3,
    /// End point.
    pub end: Point3,
    /// Frame the endpoints are expressed in.
    pub frame: Frame,
}

impl Segment {
    /// Create a segment.
    pub fn new(frame: Frame, start: Point3, end: Point3) -> Self {
        Self { start, end, frame }
    }

    /// Segment through a picked `(x, y)` spanning the depth range of `frame`.
    pub fn pick(frame: Frame, x: f64, y: f64) -> Self {
        let (near, far) = match frame {
            Frame::Window => (0.0, 1.0),
            Frame::Projection => (-1.0, 1.0),
            Frame::View => (0.0, 1.0),
            Frame::Model => (0.0, 1.0),
        };
        Self::new(frame, Point3::new(x, y, near), Point3::new(x, y, far))
    }

    /// `end - start`.
    pub fn delta(&self) -> Vec3 {
        self.end - self.start
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.delta().norm()
    }

    /// Point at `ratio` along the segment (0 at start, 1 at end).
    pub fn point_at(&self, ratio: f64) -> Point3 {
        self.start.lerp(&self.end, ratio)
    }

    /// Both endpoints finite.
    pub fn is_finite(&self) -> bool {
        self.start.iter().chain(self.end.iter()).all(|c| c.is_finite())
    }

    /// Segment with both endpoints mapped through `transform`, tagged `frame`.
    pub fn transformed(&self, transform: &Transform, frame: Frame) -> Self {
        Self::new(
            frame,
            transform.apply_point(&self.start),
            transform.apply_point(&self.end),
        )
    }
}
