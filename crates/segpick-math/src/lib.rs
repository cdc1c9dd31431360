#![warn(missing_docs)]

//! Math types for segment picking.
//!
//! Thin wrappers around nalgebra providing the point, vector, direction and
//! transform types shared by the mesh storage and the intersector crates.
//! All geometry is carried in double precision.

use nalgebra::{Unit, Vector3, Vector4};

pub use nalgebra::Matrix4;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A 4x4 homogeneous transformation matrix.
///
/// Matrices act on column vectors: `then(a, b)` applies `b` first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Non-uniform scale by `(sx, sy, sz)`.
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 0)] = sx;
        m[(1, 1)] = sy;
        m[(2, 2)] = sz;
        Self { matrix: m }
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// OpenGL-style perspective projection (view space to clip space).
    pub fn perspective(fovy: f64, aspect: f64, znear: f64, zfar: f64) -> Self {
        Self {
            matrix: Matrix4::new_perspective(aspect, fovy, znear, zfar),
        }
    }

    /// Viewport transform taking normalized device coordinates `[-1, 1]`
    /// into window coordinates, with depth mapped to `[0, 1]`.
    pub fn viewport(x: f64, y: f64, width: f64, height: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 0)] = 0.5 * width;
        m[(0, 3)] = x + 0.5 * width;
        m[(1, 1)] = 0.5 * height;
        m[(1, 3)] = y + 0.5 * height;
        m[(2, 2)] = 0.5;
        m[(2, 3)] = 0.5;
        Self { matrix: m }
    }

    /// Compose: `self` then `other` (self * other).
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point, dividing through by the homogeneous coordinate.
    ///
    /// Affine matrices leave `w == 1`, so the divide only matters for
    /// projection and window matrices.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        if v.w == 1.0 {
            Point3::new(v.x, v.y, v.z)
        } else {
            let inv_w = 1.0 / v.w;
            Point3::new(v.x * inv_w, v.y * inv_w, v.z * inv_w)
        }
    }

    /// Transform a normal vector (uses inverse transpose of upper-left 3x3).
    pub fn apply_normal(&self, n: &Vec3) -> Vec3 {
        let m3 = self.matrix.fixed_view::<3, 3>(0, 0);
        if let Some(inv) = m3.try_inverse() {
            inv.transpose() * n
        } else {
            // Degenerate transform, return input unchanged
            *n
        }
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_identity_transform() {
        let t = Transform::identity();
        let p = Point3::new(1.0, 2.0, 3.0);
        let result = t.apply_point(&p);
        assert!((result - p).norm() < 1e-12);
    }

    #[test]
    fn test_translation() {
        let t = Transform::translation(10.0, 20.0, 30.0);
        let p = Point3::new(1.0, 2.0, 3.0);
        let result = t.apply_point(&p);
        assert!((result.x - 11.0).abs() < 1e-12);
        assert!((result.y - 22.0).abs() < 1e-12);
        assert!((result.z - 33.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_z_90() {
        let t = Transform::rotation_z(PI / 2.0);
        let p = Point3::new(1.0, 0.0, 0.0);
        let result = t.apply_point(&p);
        assert!(result.x.abs() < 1e-12);
        assert!((result.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_compose_applies_right_operand_first() {
        let translate = Transform::translation(1.0, 0.0, 0.0);
        let scale = Transform::scale(2.0, 2.0, 2.0);
        // scale * translate: origin -> (1,0,0) -> (2,0,0)
        let composed = scale.then(&translate);
        let result = composed.apply_point(&Point3::origin());
        assert!((result.x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_inverse() {
        let t = Transform::translation(1.0, 2.0, 3.0);
        let inv = t.inverse().unwrap();
        let composed = t.then(&inv);
        let p = Point3::new(5.0, 6.0, 7.0);
        let result = composed.apply_point(&p);
        assert!((result - p).norm() < 1e-12);
    }

    #[test]
    fn test_singular_has_no_inverse() {
        let t = Transform::scale(1.0, 0.0, 1.0);
        assert!(t.inverse().is_none());
    }

    #[test]
    fn test_perspective_divides_by_w() {
        let proj = Transform::perspective(PI / 2.0, 1.0, 1.0, 100.0);
        // Points on the near and far planes land on NDC depth -1 and +1.
        let near = proj.apply_point(&Point3::new(0.0, 0.0, -1.0));
        let far = proj.apply_point(&Point3::new(0.0, 0.0, -100.0));
        assert_relative_eq!(near.z, -1.0, epsilon = 1e-12);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-12);

        let inv = proj.inverse().unwrap();
        let back = inv.apply_point(&far);
        assert_relative_eq!(back.z, -100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_viewport_maps_ndc_corners() {
        let vp = Transform::viewport(0.0, 0.0, 800.0, 600.0);
        let lo = vp.apply_point(&Point3::new(-1.0, -1.0, -1.0));
        let hi = vp.apply_point(&Point3::new(1.0, 1.0, 1.0));
        assert!((lo - Point3::new(0.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((hi - Point3::new(800.0, 600.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_apply_normal_non_uniform_scale() {
        let t = Transform::scale(2.0, 1.0, 1.0);
        // Plane x + y = const; its normal tilts toward y under an x stretch.
        let n = t.apply_normal(&Vec3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(n.x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(n.y, 1.0, epsilon = 1e-12);
    }
}
