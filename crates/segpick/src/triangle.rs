//! Segment-triangle intersection.
//!
//! Each triangle edge spans a plane together with the segment direction. The
//! segment start must lie on the same side of all three planes as the
//! opposite vertex and no farther away; the signed distances then give the
//! barycentric weights of the crossing point directly.

use segpick_math::{Dir3, Point3, Vec3};
use segpick_mesh::TriangleRef;

use crate::collector::TriangleIntersections;

/// Barycentric weight of one triangle corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VertexSlot {
    /// Vertex data was temporary; only the weight is kept.
    Ratio(f64),
    /// Weight plus the vertex's index in the drawable's storage.
    Indexed {
        /// Barycentric weight.
        ratio: f64,
        /// Vertex index.
        index: u32,
    },
}

impl VertexSlot {
    fn new(ratio: f64, index: u32, temporary: bool) -> Self {
        if temporary {
            VertexSlot::Ratio(ratio)
        } else {
            VertexSlot::Indexed { ratio, index }
        }
    }

    /// Barycentric weight.
    pub fn ratio(&self) -> f64 {
        match *self {
            VertexSlot::Ratio(ratio) | VertexSlot::Indexed { ratio, .. } => ratio,
        }
    }

    /// Vertex index, when the vertex data was persistent.
    pub fn index(&self) -> Option<u32> {
        match *self {
            VertexSlot::Ratio(_) => None,
            VertexSlot::Indexed { index, .. } => Some(index),
        }
    }
}

/// One triangle crossed by the segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Sequential index of the triangle within its drawable.
    pub index: usize,
    /// Unit normal, following the triangle's winding.
    pub normal: Dir3,
    /// Weights of the three corners, summing to 1.
    pub vertices: [VertexSlot; 3],
}

/// Tests triangles one by one against a fixed segment and collects the hits.
#[derive(Debug, Clone)]
pub struct TriangleIntersector {
    start: Point3,
    /// Unit direction from start to end.
    dir: Vec3,
    length: f64,
    /// Triangles visited so far.
    visited: usize,
    intersections: TriangleIntersections,
}

impl TriangleIntersector {
    /// Prepare to test against the segment `start`..`end`.
    pub fn new(start: Point3, end: Point3) -> Self {
        let delta = end - start;
        let length = delta.norm();
        Self {
            start,
            dir: delta / length,
            length,
            visited: 0,
            intersections: TriangleIntersections::new(),
        }
    }

    /// Test the next triangle in sequence, recording a hit if there is one.
    pub fn visit(&mut self, tri: &TriangleRef) {
        let index = self.visited;
        self.visited += 1;
        if let Some((ratio, hit)) = self.test(index, tri) {
            self.intersections.insert(ratio, hit);
        }
    }

    /// Whether any visited triangle was hit.
    pub fn hit(&self) -> bool {
        !self.intersections.is_empty()
    }

    /// Number of triangles visited.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Collected hits.
    pub fn into_intersections(self) -> TriangleIntersections {
        self.intersections
    }

    /// Test one triangle, returning the ratio along the segment and the hit.
    ///
    /// Pure: the same triangle always yields the same result.
    pub fn test(&self, index: usize, tri: &TriangleRef) -> Option<(f64, TriangleHit)> {
        if self.length <= 0.0 || !self.length.is_finite() {
            return None;
        }

        let [v1, v2, v3] = tri.positions;
        if v1 == v2 || v2 == v3 || v1 == v3 {
            return None;
        }

        let v12 = v2 - v1;
        let n12 = v12.cross(&self.dir);
        let ds12 = (self.start - v1).dot(&n12);
        let d312 = (v3 - v1).dot(&n12);
        if !within_edge(ds12, d312) {
            return None;
        }

        let v23 = v3 - v2;
        let n23 = v23.cross(&self.dir);
        let ds23 = (self.start - v2).dot(&n23);
        let d123 = (v1 - v2).dot(&n23);
        if !within_edge(ds23, d123) {
            return None;
        }

        let v31 = v1 - v3;
        let n31 = v31.cross(&self.dir);
        let ds31 = (self.start - v3).dot(&n31);
        let d231 = (v2 - v3).dot(&n31);
        if !within_edge(ds31, d231) {
            return None;
        }

        // Zero denominators mean the triangle is parallel to the segment.
        let mut r3 = edge_ratio(ds12, d312)?;
        let mut r1 = edge_ratio(ds23, d123)?;
        let mut r2 = edge_ratio(ds31, d231)?;

        let total = r1 + r2 + r3;
        if total != 1.0 {
            if total == 0.0 {
                return None;
            }
            let inv_total = 1.0 / total;
            r1 *= inv_total;
            r2 *= inv_total;
            r3 *= inv_total;
        }

        let crossing = Point3::from(v1.coords * r1 + v2.coords * r2 + v3.coords * r3);
        if !crossing.iter().all(|c| c.is_finite()) {
            log::warn!(
                "non-finite crossing point on triangle {}: vertices ({}, {}, {}), ratios ({}, {}, {})",
                index,
                v1,
                v2,
                v3,
                r1,
                r2,
                r3
            );
            return None;
        }

        let d = (crossing - self.start).dot(&self.dir);
        if d < 0.0 || d > self.length {
            return None;
        }

        let normal = Dir3::try_new(v12.cross(&v23), 0.0)?;

        let hit = TriangleHit {
            index,
            normal,
            vertices: [
                VertexSlot::new(r1, tri.indices[0], tri.temporary),
                VertexSlot::new(r2, tri.indices[1], tri.temporary),
                VertexSlot::new(r3, tri.indices[2], tri.temporary),
            ],
        };
        Some((d / self.length, hit))
    }
}

/// Half-plane test for one edge: the start projection must share the sign of
/// the opposite-vertex projection and not exceed it in magnitude.
#[inline]
fn within_edge(ds: f64, d_opposite: f64) -> bool {
    if d_opposite >= 0.0 {
        ds >= 0.0 && ds <= d_opposite
    } else {
        ds <= 0.0 && ds >= d_opposite
    }
}

#[inline]
fn edge_ratio(ds: f64, d_opposite: f64) -> Option<f64> {
    if ds == 0.0 {
        Some(0.0)
    } else if d_opposite != 0.0 {
        Some(ds / d_opposite)
    } else {
        None
    }
}
