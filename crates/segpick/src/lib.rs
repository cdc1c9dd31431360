#![warn(missing_docs)]

//! Line segment picking against triangle geometry.
//!
//! A query segment is declared in window, projection, view or model space.
//! As a scene traversal descends into coordinate scopes, the query is mapped
//! into each scope's model space, rejected early against bounding spheres and
//! boxes, and finally tested triangle by triangle. Hits come back ordered by
//! their position along the queried segment.
//!
//! # Architecture
//!
//! - [`Segment`] / [`Frame`] - the queried segment and its reference frame
//! - [`LineSegmentIntersector`] - per-scope query: culling, derivation and
//!   drawable intersection
//! - [`IntersectorStack`] - derived queries for nested scopes, routing hits
//!   to the root
//! - [`triangle`] - exact segment-triangle test with barycentric weights
//! - [`bounds`] - sphere and box rejection tests
//! - [`Intersections`] - hit records ordered by ratio
//! - [`QueryConfig`] - serializable query descriptors
//!
//! # Example
//!
//! ```ignore
//! use segpick::{Frame, IntersectorStack, LineSegmentIntersector, TraversalContext};
//!
//! let root = LineSegmentIntersector::pick(Frame::Window, 320.0, 240.0);
//! let mut stack = IntersectorStack::new(root);
//!
//! let ctx = TraversalContext::new()
//!     .with_window(viewport)
//!     .with_projection(projection)
//!     .with_view(camera);
//! stack.push(&ctx)?;
//! stack.intersect(&ctx, &geometry);
//!
//! if let Some(hit) = stack.intersections().first() {
//!     println!("picked {:?} at {}", hit.drawable, hit.world_point());
//! }
//! ```

pub mod bounds;
mod collector;
pub mod error;
mod frame;
mod hit;
mod intersector;
mod query;
mod segment;
mod stack;
pub mod triangle;

pub use collector::TriangleIntersections;
pub use error::{IntersectError, Result};
pub use frame::{NodeBounds, NodeId, TraversalContext};
pub use hit::{Hit, HitSink, Intersections, VertexWeight};
pub use intersector::{IntersectorId, LineSegmentIntersector};
pub use query::QueryConfig;
pub use segment::{Frame, Segment};
pub use stack::IntersectorStack;
pub use triangle::{TriangleHit, TriangleIntersector, VertexSlot};

pub use segpick_math::{Point3, Transform, Vec3};
pub use segpick_mesh::{
    BoundingBox, BoundingSphere, Drawable, DrawableId, Geometry, PrimitiveMode, TriangleMesh,
    TriangleRef, TriangleSoup,
};
