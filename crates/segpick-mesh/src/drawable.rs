//! The drawable interface seen by the intersector.

use segpick_math::Point3;

use crate::bounds::BoundingBox;
use crate::mesh::TriangleMesh;

/// Identifier of a drawable, copied into every hit found on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawableId(pub u64);

/// One triangle handed to a visitor.
///
/// When `temporary` is set the positions were synthesized for this call only,
/// and `indices` must not be retained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleRef {
    /// Vertex positions in double precision.
    pub positions: [Point3; 3],
    /// Indices of the vertices in the drawable's vertex storage.
    pub indices: [u32; 3],
    /// Vertex data is only valid for the duration of the visit.
    pub temporary: bool,
}

/// Something that can be tested against a segment.
pub trait Drawable {
    /// Identifier reported in hits.
    fn id(&self) -> DrawableId;

    /// Local-space bounding box.
    fn bounding_box(&self) -> BoundingBox;

    /// Visit every triangle in sequential order.
    fn accept_triangles(&self, visit: &mut dyn FnMut(&TriangleRef));
}

/// A mesh with stable vertex storage.
#[derive(Debug, Clone)]
pub struct Geometry {
    /// Drawable identifier.
    pub id: DrawableId,
    /// Vertex and index storage.
    pub mesh: TriangleMesh,
}

impl Geometry {
    /// Wrap a mesh.
    pub fn new(id: DrawableId, mesh: TriangleMesh) -> Self {
        Self { id, mesh }
    }
}

impl Drawable for Geometry {
    fn id(&self) -> DrawableId {
        self.id
    }

    fn bounding_box(&self) -> BoundingBox {
        self.mesh.bounding_box()
    }

    fn accept_triangles(&self, visit: &mut dyn FnMut(&TriangleRef)) {
        let skipped = self.mesh.for_each_triangle(|t| visit(t));
        if skipped > 0 {
            log::warn!(
                "drawable {:?}: skipped {} of {} triangles with out-of-range indices",
                self.id,
                skipped,
                self.mesh.num_triangles()
            );
        }
    }
}

/// Loose triangles with no persistent vertex storage.
///
/// Every triangle is delivered as temporary, so hits on a soup carry no
/// vertex indices.
#[derive(Debug, Clone, Default)]
pub struct TriangleSoup {
    /// Drawable identifier.
    pub id: DrawableId,
    /// Triangle corners.
    pub triangles: Vec<[Point3; 3]>,
}

impl TriangleSoup {
    /// Create an empty soup.
    pub fn new(id: DrawableId) -> Self {
        Self {
            id,
            triangles: Vec::new(),
        }
    }

    /// Append a triangle.
    pub fn push(&mut self, a: Point3, b: Point3, c: Point3) {
        self.triangles.push([a, b, c]);
    }
}

impl Drawable for TriangleSoup {
    fn id(&self) -> DrawableId {
        self.id
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.triangles.iter().flatten())
    }

    fn accept_triangles(&self, visit: &mut dyn FnMut(&TriangleRef)) {
        for (i, tri) in self.triangles.iter().enumerate() {
            let base = i as u32 * 3;
            visit(&TriangleRef {
                positions: *tri,
                indices: [base, base + 1, base + 2],
                temporary: true,
            });
        }
    }
}
