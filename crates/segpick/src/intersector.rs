//! Line segment intersector driven by a scene traversal.

use segpick_math::Point3;
use segpick_mesh::{BoundingBox, BoundingSphere, Drawable};

use crate::bounds::{clip_segment_to_box, segment_intersects_sphere};
use crate::error::{IntersectError, Result};
use crate::frame::{NodeBounds, TraversalContext};
use crate::hit::{Hit, HitSink, Intersections, VertexWeight};
use crate::segment::{Frame, Segment};
use crate::triangle::TriangleIntersector;

/// Handle of an intersector held by an [`IntersectorStack`](crate::IntersectorStack).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntersectorId(pub usize);

/// Intersects a segment with the drawables of a scene.
///
/// A query expressed in window, projection or view space is adapted to each
/// coordinate scope with [`derive`](Self::derive); derived queries are always
/// in model space and point back at the query they came from.
#[derive(Debug, Clone)]
pub struct LineSegmentIntersector {
    segment: Segment,
    parent: Option<IntersectorId>,
    intersections: Intersections,
}

impl LineSegmentIntersector {
    /// Query along `start`..`end` in `frame`.
    pub fn new(frame: Frame, start: Point3, end: Point3) -> Self {
        Self::from_segment(Segment::new(frame, start, end))
    }

    /// Query along an existing segment.
    pub fn from_segment(segment: Segment) -> Self {
        Self {
            segment,
            parent: None,
            intersections: Intersections::new(),
        }
    }

    /// Query through the point `(x, y)` across the full depth of `frame`.
    pub fn pick(frame: Frame, x: f64, y: f64) -> Self {
        Self::from_segment(Segment::pick(frame, x, y))
    }

    /// The queried segment.
    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Start point.
    pub fn start(&self) -> Point3 {
        self.segment.start
    }

    /// End point.
    pub fn end(&self) -> Point3 {
        self.segment.end
    }

    /// Frame the segment is expressed in.
    pub fn frame(&self) -> Frame {
        self.segment.frame
    }

    /// Query this one was derived from.
    pub fn parent(&self) -> Option<IntersectorId> {
        self.parent
    }

    /// Hits recorded directly on this query.
    pub fn intersections(&self) -> &Intersections {
        &self.intersections
    }

    /// True when at least one hit has been recorded.
    pub fn contains_intersections(&self) -> bool {
        !self.intersections.is_empty()
    }

    /// Nearest recorded hit.
    pub fn first_intersection(&self) -> Option<&Hit> {
        self.intersections.first()
    }

    /// Record a hit on this query.
    pub fn insert_intersection(&mut self, hit: Hit) {
        self.intersections.insert(hit);
    }

    /// Record a batch of hits already sorted by ratio.
    pub fn merge_intersections(&mut self, hits: Vec<Hit>) {
        self.intersections.merge_sorted(hits);
    }

    /// Drop the link to the query this one was derived from.
    pub(crate) fn detach(&mut self) {
        self.parent = None;
    }

    /// Derive a model-space query for the scope described by `ctx`.
    ///
    /// The present transforms between model space and this query's frame are
    /// composed, inverted and applied to both endpoints. When there is nothing
    /// to apply the segment is reused as is.
    pub fn derive(&self, ctx: &TraversalContext, parent: IntersectorId) -> Result<Self> {
        let segment = match ctx.model_to_frame(self.segment.frame) {
            None => Segment {
                frame: Frame::Model,
                ..self.segment
            },
            Some(matrix) => {
                let inverse = matrix.inverse().ok_or_else(|| {
                    log::warn!(
                        "cannot invert transform chain from {:?} space",
                        self.segment.frame
                    );
                    IntersectError::SingularTransform {
                        frame: self.segment.frame,
                    }
                })?;
                let derived = self.segment.transformed(&inverse, Frame::Model);
                if !derived.is_finite() {
                    return Err(IntersectError::NonFiniteCoordinate(format!(
                        "segment derived from {:?} space",
                        self.segment.frame
                    )));
                }
                derived
            }
        };

        log::debug!(
            "derived model-space query from {:?}: {} -> {}",
            self.segment.frame,
            segment.start,
            segment.end
        );

        Ok(Self {
            segment,
            parent: Some(parent),
            intersections: Intersections::new(),
        })
    }

    /// Whether the traversal should descend into a node.
    pub fn enter(&self, bounds: &NodeBounds) -> bool {
        !bounds.culling_active || self.intersects(&bounds.sphere)
    }

    /// Called when the traversal leaves a node.
    pub fn leave(&self) {}

    /// Sphere rejection test against this query's segment.
    pub fn intersects(&self, sphere: &BoundingSphere) -> bool {
        segment_intersects_sphere(&self.segment.start, &self.segment.end, sphere)
    }

    /// Clip a copy of this query's segment to `bb`.
    ///
    /// Returns the clipped endpoints, or `None` when the segment misses the box.
    pub fn clip_to(&self, bb: &BoundingBox) -> Option<(Point3, Point3)> {
        let (mut s, mut e) = (self.segment.start, self.segment.end);
        clip_segment_to_box(&mut s, &mut e, bb).then_some((s, e))
    }

    /// Intersect a drawable and record the hits on this query.
    pub fn intersect(&mut self, ctx: &TraversalContext, drawable: &dyn Drawable) -> usize {
        let mut found = Vec::new();
        let n = self.intersect_into(ctx, drawable, &mut found);
        self.intersections.merge_sorted(found);
        n
    }

    /// Intersect a drawable, handing each hit to `sink` in ascending ratio
    /// order. Returns the number of hits.
    ///
    /// The segment is taken to be in the drawable's local frame.
    pub fn intersect_into(
        &self,
        ctx: &TraversalContext,
        drawable: &dyn Drawable,
        sink: &mut dyn HitSink,
    ) -> usize {
        let bb = drawable.bounding_box();
        if !bb.is_valid() {
            log::warn!("drawable {:?} has no vertex data", drawable.id());
            return 0;
        }
        if self.clip_to(&bb).is_none() {
            log::debug!("drawable {:?} rejected by its bounding box", drawable.id());
            return 0;
        }

        // The clipped range can sit close enough to the box to lose hits to
        // rounding, so the triangles are tested against the full segment.
        let (s, e) = (self.segment.start, self.segment.end);

        let mut tester = TriangleIntersector::new(s, e);
        drawable.accept_triangles(&mut |tri| tester.visit(tri));
        if !tester.hit() {
            return 0;
        }

        let collected = tester.into_intersections().into_sorted();
        let count = collected.len();
        for (ratio, tri_hit) in collected {
            let ratio = remap_ratio(ratio, &s, &e, &self.segment.start, &self.segment.end);
            let vertex_weights = tri_hit
                .vertices
                .iter()
                .filter_map(|slot| {
                    slot.index().map(|index| VertexWeight {
                        index,
                        weight: slot.ratio(),
                    })
                })
                .collect();

            sink.insert_intersection(Hit {
                ratio,
                matrix: ctx.model,
                node_path: ctx.node_path.clone(),
                drawable: drawable.id(),
                primitive_index: tri_hit.index,
                local_point: self.segment.point_at(ratio),
                local_normal: tri_hit.normal.into_inner(),
                vertex_weights,
            });
        }

        log::trace!("drawable {:?}: {} hits", drawable.id(), count);
        count
    }

    /// Forget every recorded hit so the query can be reused.
    pub fn reset(&mut self) {
        self.intersections.clear();
    }
}

/// Map a ratio along the tested sub-segment `s`..`e` onto `start`..`end`.
fn remap_ratio(ratio: f64, s: &Point3, e: &Point3, start: &Point3, end: &Point3) -> f64 {
    ((s - start).norm() + ratio * (e - s).norm()) / (end - start).norm()
}
