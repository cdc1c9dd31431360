//! Indexed triangle storage.

use segpick_math::Point3;

use crate::bounds::BoundingBox;
use crate::drawable::TriangleRef;

/// How the index list of a [`TriangleMesh`] is grouped into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveMode {
    /// Every three indices form one triangle.
    #[default]
    Triangles,
    /// Each index after the second closes a triangle with the previous two;
    /// odd triangles swap their last two vertices to keep a consistent winding.
    TriangleStrip,
    /// Each index after the second closes a triangle with the first index and
    /// the previous one.
    TriangleFan,
}

/// Triangle mesh with single-precision positions.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub vertices: Vec<f32>,
    /// Vertex indices, grouped according to `mode`.
    pub indices: Vec<u32>,
    /// Index grouping.
    pub mode: PrimitiveMode,
}

impl TriangleMesh {
    /// Create an empty triangle-list mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from flat positions and indices.
    pub fn from_parts(vertices: Vec<f32>, indices: Vec<u32>, mode: PrimitiveMode) -> Self {
        Self {
            vertices,
            indices,
            mode,
        }
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of triangles described by the index list.
    pub fn num_triangles(&self) -> usize {
        match self.mode {
            PrimitiveMode::Triangles => self.indices.len() / 3,
            PrimitiveMode::TriangleStrip | PrimitiveMode::TriangleFan => {
                self.indices.len().saturating_sub(2)
            }
        }
    }

    /// Append a vertex, returning its index.
    pub fn push_vertex(&mut self, p: [f32; 3]) -> u32 {
        let idx = self.num_vertices() as u32;
        self.vertices.extend_from_slice(&p);
        idx
    }

    /// Position of vertex `i`, widened to f64.
    pub fn vertex(&self, i: u32) -> Option<Point3> {
        let base = i as usize * 3;
        let v = self.vertices.get(base..base + 3)?;
        Some(Point3::new(v[0] as f64, v[1] as f64, v[2] as f64))
    }

    /// Bounding box over every stored vertex.
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bb = BoundingBox::empty();
        for v in self.vertices.chunks_exact(3) {
            bb.include_point(&Point3::new(v[0] as f64, v[1] as f64, v[2] as f64));
        }
        bb
    }

    /// Index triples in sequential triangle order.
    pub fn triangle_indices(&self) -> Vec<[u32; 3]> {
        let idx = &self.indices;
        match self.mode {
            PrimitiveMode::Triangles => idx
                .chunks_exact(3)
                .map(|t| [t[0], t[1], t[2]])
                .collect(),
            PrimitiveMode::TriangleStrip => (2..idx.len())
                .map(|i| {
                    if (i - 2) % 2 == 1 {
                        [idx[i - 2], idx[i], idx[i - 1]]
                    } else {
                        [idx[i - 2], idx[i - 1], idx[i]]
                    }
                })
                .collect(),
            PrimitiveMode::TriangleFan => (2..idx.len())
                .map(|i| [idx[0], idx[i - 1], idx[i]])
                .collect(),
        }
    }

    /// Visit every triangle whose indices resolve to stored vertices.
    ///
    /// Triangles referencing missing vertices are skipped; the number skipped
    /// is returned.
    pub fn for_each_triangle(&self, mut visit: impl FnMut(&TriangleRef)) -> usize {
        let mut skipped = 0;
        for tri in self.triangle_indices() {
            match (self.vertex(tri[0]), self.vertex(tri[1]), self.vertex(tri[2])) {
                (Some(a), Some(b), Some(c)) => visit(&TriangleRef {
                    positions: [a, b, c],
                    indices: tri,
                    temporary: false,
                }),
                _ => skipped += 1,
            }
        }
        skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_mesh(mode: PrimitiveMode) -> TriangleMesh {
        let vertices = vec![
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            1.0, 1.0, 0.0, //
            0.0, 2.0, 0.0,
        ];
        TriangleMesh::from_parts(vertices, vec![0, 1, 2, 3, 4], mode)
    }

    #[test]
    fn test_triangle_list_grouping() {
        let mesh = TriangleMesh::from_parts(vec![0.0; 9], vec![0, 1, 2, 2, 1, 0, 7], PrimitiveMode::Triangles);
        assert_eq!(mesh.num_triangles(), 2);
        assert_eq!(mesh.triangle_indices(), vec![[0, 1, 2], [2, 1, 0]]);
    }

    #[test]
    fn test_strip_alternates_winding() {
        let mesh = strip_mesh(PrimitiveMode::TriangleStrip);
        assert_eq!(mesh.num_triangles(), 3);
        assert_eq!(mesh.triangle_indices(), vec![[0, 1, 2], [1, 3, 2], [2, 3, 4]]);
    }

    #[test]
    fn test_fan_shares_first_vertex() {
        let mesh = strip_mesh(PrimitiveMode::TriangleFan);
        assert_eq!(mesh.triangle_indices(), vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
    }

    #[test]
    fn test_missing_vertices_are_skipped() {
        let mut mesh = TriangleMesh::new();
        mesh.push_vertex([0.0, 0.0, 0.0]);
        mesh.push_vertex([1.0, 0.0, 0.0]);
        mesh.push_vertex([0.0, 1.0, 0.0]);
        mesh.indices = vec![0, 1, 2, 0, 1, 9];

        let mut seen = Vec::new();
        let skipped = mesh.for_each_triangle(|t| seen.push(t.indices));
        assert_eq!(skipped, 1);
        assert_eq!(seen, vec![[0, 1, 2]]);
    }

    #[test]
    fn test_bounding_box_widens_to_f64() {
        let mesh = strip_mesh(PrimitiveMode::Triangles);
        let bb = mesh.bounding_box();
        assert_eq!(bb.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bb.max, Point3::new(1.0, 2.0, 0.0));
        assert!(!TriangleMesh::new().bounding_box().is_valid());
    }
}
