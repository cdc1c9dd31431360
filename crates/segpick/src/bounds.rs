//! Fast rejection of segments against bounding volumes.
//!
//! Both tests over-approximate: they never reject a segment that crosses the
//! volume, but may accept some that do not.

use segpick_math::Point3;
use segpick_mesh::{BoundingBox, BoundingSphere};

/// Test whether the segment `start`..`end` can touch the sphere.
///
/// An undefined sphere never rejects.
pub fn segment_intersects_sphere(start: &Point3, end: &Point3, bs: &BoundingSphere) -> bool {
    if !bs.is_valid() {
        return true;
    }

    let sm = start - bs.center;
    let c = sm.norm_squared() - bs.radius * bs.radius;
    if c < 0.0 {
        // start is inside
        return true;
    }

    let se = end - start;
    let a = se.norm_squared();
    if a == 0.0 {
        return c <= 0.0;
    }
    let b = sm.dot(&se) * 2.0;
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return false;
    }

    let disc = disc.sqrt();
    let div = 1.0 / (2.0 * a);
    let r1 = (-b - disc) * div;
    let r2 = (-b + disc) * div;

    if r1 <= 0.0 && r2 <= 0.0 {
        return false;
    }
    if r1 >= 1.0 && r2 >= 1.0 {
        return false;
    }
    true
}

/// Clip the segment `s`..`e` to the box, one axis at a time in x, y, z order.
///
/// Each axis clips the endpoints left by the previous one. Returns `false` as
/// soon as an axis shows no overlap, leaving `s` and `e` partially clipped;
/// returns `true` with `s` and `e` clipped to the box otherwise.
pub fn clip_segment_to_box(s: &mut Point3, e: &mut Point3, bb: &BoundingBox) -> bool {
    (0..3).all(|axis| clip_axis(s, e, bb.min[axis], bb.max[axis], axis))
}

fn clip_axis(s: &mut Point3, e: &mut Point3, lo: f64, hi: f64, axis: usize) -> bool {
    if s[axis] <= e[axis] {
        if e[axis] < lo || s[axis] > hi {
            return false;
        }
        if s[axis] < lo {
            *s = point_at_axis_value(s, e, lo, axis);
        }
        if e[axis] > hi {
            *e = point_at_axis_value(s, e, hi, axis);
        }
    } else {
        if s[axis] < lo || e[axis] > hi {
            return false;
        }
        if e[axis] < lo {
            *e = point_at_axis_value(s, e, lo, axis);
        }
        if s[axis] > hi {
            *s = point_at_axis_value(s, e, hi, axis);
        }
    }
    true
}

/// Point on the line through `s` and `e` whose `axis` coordinate is `value`.
#[inline]
fn point_at_axis_value(s: &Point3, e: &Point3, value: f64, axis: usize) -> Point3 {
    s + (e - s) * ((value - s[axis]) / (e[axis] - s[axis]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_clip_through_box_on_x() {
        let mut s = Point3::new(-2.0, 0.5, 0.5);
        let mut e = Point3::new(2.0, 0.5, 0.5);
        assert!(clip_segment_to_box(&mut s, &mut e, &unit_box()));
        assert_eq!(s, Point3::new(0.0, 0.5, 0.5));
        assert_eq!(e, Point3::new(1.0, 0.5, 0.5));
    }

    #[test]
    fn test_clip_reversed_segment() {
        let mut s = Point3::new(2.0, 0.5, 0.5);
        let mut e = Point3::new(-2.0, 0.5, 0.5);
        assert!(clip_segment_to_box(&mut s, &mut e, &unit_box()));
        assert_eq!(s, Point3::new(1.0, 0.5, 0.5));
        assert_eq!(e, Point3::new(0.0, 0.5, 0.5));
    }

    #[test]
    fn test_inside_segment_unchanged() {
        let s0 = Point3::new(0.1, 0.2, 0.3);
        let e0 = Point3::new(0.9, 0.8, 0.7);
        let (mut s, mut e) = (s0, e0);
        assert!(clip_segment_to_box(&mut s, &mut e, &unit_box()));
        assert_eq!(s, s0);
        assert_eq!(e, e0);
    }

    #[test]
    fn test_outside_on_any_axis_rejected() {
        let cases = [
            (Point3::new(2.0, 0.5, 0.5), Point3::new(3.0, 0.5, 0.5)),
            (Point3::new(0.5, -3.0, 0.5), Point3::new(0.5, -1.0, 0.5)),
            (Point3::new(0.5, 0.5, 1.5), Point3::new(0.5, 0.5, 4.0)),
            (Point3::new(0.5, 0.5, 4.0), Point3::new(0.5, 0.5, 1.5)),
        ];
        for (mut s, mut e) in cases {
            assert!(!clip_segment_to_box(&mut s, &mut e, &unit_box()));
        }
    }

    #[test]
    fn test_diagonal_clip_uses_previous_axis() {
        let mut s = Point3::new(-1.0, -1.0, 0.5);
        let mut e = Point3::new(2.0, 2.0, 0.5);
        assert!(clip_segment_to_box(&mut s, &mut e, &unit_box()));
        assert_relative_eq!(s.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(s.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(e.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(e.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_corner_miss_rejected_after_clipping() {
        // Overlaps each axis range separately but passes outside the corner.
        let mut s = Point3::new(-1.0, 0.5, 0.5);
        let mut e = Point3::new(0.5, 3.0, 0.5);
        assert!(!clip_segment_to_box(&mut s, &mut e, &unit_box()));
    }

    #[test]
    fn test_invalid_sphere_never_rejects() {
        let far = Point3::new(100.0, 100.0, 100.0);
        let bs = BoundingSphere::invalid();
        assert!(segment_intersects_sphere(&far, &(far + segpick_math::Vec3::x()), &bs));
    }

    #[test]
    fn test_sphere_crossed() {
        let bs = BoundingSphere::new(Point3::origin(), 1.0);
        let s = Point3::new(-5.0, 0.0, 0.0);
        let e = Point3::new(5.0, 0.0, 0.0);
        assert!(segment_intersects_sphere(&s, &e, &bs));
    }

    #[test]
    fn test_sphere_off_line_rejected() {
        let bs = BoundingSphere::new(Point3::origin(), 1.0);
        let s = Point3::new(-5.0, 2.0, 0.0);
        let e = Point3::new(5.0, 2.0, 0.0);
        assert!(!segment_intersects_sphere(&s, &e, &bs));
    }

    #[test]
    fn test_sphere_before_or_after_segment_rejected() {
        let bs = BoundingSphere::new(Point3::origin(), 1.0);
        let before = (Point3::new(2.0, 0.0, 0.0), Point3::new(5.0, 0.0, 0.0));
        assert!(!segment_intersects_sphere(&before.0, &before.1, &bs));
        let after = (Point3::new(-5.0, 0.0, 0.0), Point3::new(-2.0, 0.0, 0.0));
        assert!(!segment_intersects_sphere(&after.0, &after.1, &bs));
    }

    #[test]
    fn test_sphere_start_inside_accepted() {
        let bs = BoundingSphere::new(Point3::origin(), 1.0);
        let s = Point3::new(0.2, 0.0, 0.0);
        let e = Point3::new(9.0, 9.0, 9.0);
        assert!(segment_intersects_sphere(&s, &e, &bs));
    }

    #[test]
    fn test_sphere_end_inside_accepted() {
        let bs = BoundingSphere::new(Point3::origin(), 1.0);
        let s = Point3::new(-5.0, 0.0, 0.0);
        let e = Point3::new(0.0, 0.0, 0.0);
        assert!(segment_intersects_sphere(&s, &e, &bs));
    }
}
