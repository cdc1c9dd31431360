#![warn(missing_docs)]

//! Vertex storage and bounding volumes for segpick.
//!
//! - [`TriangleMesh`] - single-precision positions with indexed triangles,
//!   strips or fans
//! - [`TriangleSoup`] - loose triangles whose vertex data is temporary
//! - [`BoundingBox`] / [`BoundingSphere`] - coarse volumes used for rejection
//! - [`Drawable`] - what the intersector walks

pub mod bounds;
pub mod drawable;
pub mod mesh;

pub use bounds::{BoundingBox, BoundingSphere};
pub use drawable::{Drawable, DrawableId, Geometry, TriangleRef, TriangleSoup};
pub use mesh::{PrimitiveMode, TriangleMesh};
