//! Ray intersection primitives.

use meshguard_types::{Aabb, Point3, Triangle, Vector3};

/// A ray hit against an indexed triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the hit point.
    pub distance: f64,
    /// Index of the triangle that was hit.
    pub triangle: usize,
}

/// Component-wise reciprocal of a ray direction for slab tests.
///
/// Near-zero components map to `f64::MAX` so the corresponding slab is
/// effectively ignored.
#[must_use]
pub fn direction_inverse(direction: &Vector3<f64>, epsilon: f64) -> Vector3<f64> {
    Vector3::new(
        if direction.x.abs() > epsilon {
            1.0 / direction.x
        } else {
            f64::MAX
        },
        if direction.y.abs() > epsilon {
            1.0 / direction.y
        } else {
            f64::MAX
        },
        if direction.z.abs() > epsilon {
            1.0 / direction.z
        } else {
            f64::MAX
        },
    )
}

/// Slab test of a ray against a bounding box.
///
/// Returns the entry/exit parameters `(t_near, t_far)` with `t_near`
/// clamped to zero, or `None` when the ray misses the box entirely.
#[must_use]
pub fn ray_aabb(
    aabb: &Aabb,
    origin: &Point3<f64>,
    dir_inv: &Vector3<f64>,
) -> Option<(f64, f64)> {
    let t1 = (aabb.min.x - origin.x) * dir_inv.x;
    let t2 = (aabb.max.x - origin.x) * dir_inv.x;
    let t3 = (aabb.min.y - origin.y) * dir_inv.y;
    let t4 = (aabb.max.y - origin.y) * dir_inv.y;
    let t5 = (aabb.min.z - origin.z) * dir_inv.z;
    let t6 = (aabb.max.z - origin.z) * dir_inv.z;

    let t_near = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let t_far = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if t_far >= t_near && t_far >= 0.0 {
        Some((t_near.max(0.0), t_far))
    } else {
        None
    }
}

/// Möller–Trumbore ray-triangle intersection.
///
/// Returns the hit distance `t > epsilon`, or `None` when the ray misses,
/// is parallel to the triangle plane, or hits behind the origin.
#[must_use]
pub fn ray_triangle(
    origin: &Point3<f64>,
    direction: &Vector3<f64>,
    tri: &Triangle,
    epsilon: f64,
) -> Option<f64> {
    let edge1 = tri.b - tri.a;
    let edge2 = tri.c - tri.a;

    let h = direction.cross(&edge2);
    let det = edge1.dot(&h);
    if det.abs() < epsilon {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = origin - tri.a;
    let u = inv_det * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = inv_det * direction.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = inv_det * edge2.dot(&q);
    if t > epsilon {
        Some(t)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground_triangle() -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        )
    }

    #[test]
    fn ray_hits_triangle() {
        let origin = Point3::new(0.5, 0.5, 2.0);
        let direction = Vector3::new(0.0, 0.0, -1.0);
        let t = ray_triangle(&origin, &direction, &ground_triangle(), 1e-10);
        assert!(t.is_some());
        assert!((t.unwrap() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn ray_misses_triangle() {
        let origin = Point3::new(5.0, 5.0, 2.0);
        let direction = Vector3::new(0.0, 0.0, -1.0);
        assert!(ray_triangle(&origin, &direction, &ground_triangle(), 1e-10).is_none());
    }

    #[test]
    fn hit_behind_origin_is_rejected() {
        let origin = Point3::new(0.5, 0.5, -1.0);
        let direction = Vector3::new(0.0, 0.0, -1.0);
        assert!(ray_triangle(&origin, &direction, &ground_triangle(), 1e-10).is_none());
    }

    #[test]
    fn parallel_ray_is_rejected() {
        let origin = Point3::new(0.0, 0.0, 1.0);
        let direction = Vector3::new(1.0, 0.0, 0.0);
        assert!(ray_triangle(&origin, &direction, &ground_triangle(), 1e-10).is_none());
    }

    #[test]
    fn slab_test_entry_exit() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let origin = Point3::new(0.5, 0.5, -1.0);
        let direction = Vector3::new(0.0, 0.0, 1.0);
        let dir_inv = direction_inverse(&direction, 1e-12);

        let (t_near, t_far) = ray_aabb(&aabb, &origin, &dir_inv).unwrap();
        assert!((t_near - 1.0).abs() < 1e-12);
        assert!((t_far - 2.0).abs() < 1e-12);

        let miss_origin = Point3::new(5.0, 5.0, -1.0);
        assert!(ray_aabb(&aabb, &miss_origin, &dir_inv).is_none());
    }

    #[test]
    fn slab_test_origin_inside() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let origin = Point3::new(0.5, 0.5, 0.5);
        let dir_inv = direction_inverse(&Vector3::new(0.0, 0.0, 1.0), 1e-12);

        let (t_near, _) = ray_aabb(&aabb, &origin, &dir_inv).unwrap();
        assert!((t_near - 0.0).abs() < 1e-12);
    }
}
