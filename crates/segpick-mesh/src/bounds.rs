//! Bounding volumes handed to the intersector by the traversal.

use segpick_math::Point3;

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl BoundingBox {
    /// Create a box from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create an empty (inverted) box suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box containing every point of the iterator.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Self {
        let mut bb = Self::empty();
        for p in points {
            bb.include_point(p);
        }
        bb
    }

    /// True once at least one point has been included.
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Expand this box to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Center of the box.
    pub fn center(&self) -> Point3 {
        self.min + (self.max - self.min) * 0.5
    }

    /// Half the length of the box diagonal.
    pub fn radius(&self) -> f64 {
        (self.max - self.min).norm() * 0.5
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

/// Bounding sphere. A negative radius marks a sphere that has not been
/// defined yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Sphere center.
    pub center: Point3,
    /// Sphere radius, negative when undefined.
    pub radius: f64,
}

impl BoundingSphere {
    /// Create a sphere from center and radius.
    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// An undefined sphere.
    pub fn invalid() -> Self {
        Self {
            center: Point3::origin(),
            radius: -1.0,
        }
    }

    /// Sphere enclosing a box, or an undefined sphere for an empty box.
    pub fn from_box(bb: &BoundingBox) -> Self {
        if bb.is_valid() {
            Self::new(bb.center(), bb.radius())
        } else {
            Self::invalid()
        }
    }

    /// True when the sphere has been defined.
    pub fn is_valid(&self) -> bool {
        self.radius >= 0.0
    }
}

impl Default for BoundingSphere {
    fn default() -> Self {
        Self::invalid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_box_is_invalid() {
        let bb = BoundingBox::empty();
        assert!(!bb.is_valid());
        let sphere = BoundingSphere::from_box(&bb);
        assert!(!sphere.is_valid());
    }

    #[test]
    fn test_box_from_points() {
        let pts = [
            Point3::new(1.0, -2.0, 0.5),
            Point3::new(-1.0, 3.0, 0.0),
            Point3::new(0.0, 0.0, 2.0),
        ];
        let bb = BoundingBox::from_points(&pts);
        assert!(bb.is_valid());
        assert_eq!(bb.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(bb.max, Point3::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn test_sphere_from_box() {
        let bb = BoundingBox::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0));
        let sphere = BoundingSphere::from_box(&bb);
        assert!(sphere.is_valid());
        assert_eq!(sphere.center, Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(sphere.radius, 3.0_f64.sqrt(), epsilon = 1e-12);
    }
}
