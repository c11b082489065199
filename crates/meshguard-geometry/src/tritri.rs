//! Exact triangle-triangle intersection test.
//!
//! Möller-style interval test: reject by plane sides, then intersect the
//! two plane-crossing segments on the common line. Coplanar pairs fall
//! back to a 2D overlap test in the dominant projection plane.

use meshguard_types::{Point3, Triangle, Vector3};

/// Test whether two triangles properly intersect.
///
/// Returns a representative contact point when the triangles overlap along
/// a segment (or, for coplanar pairs, a region) longer than `epsilon`.
/// Grazing contact at a single point and degenerate (zero-area) inputs
/// return `None`; the caller is expected to have excluded index-adjacent
/// pairs already.
///
/// # Example
///
/// ```
/// use meshguard_geometry::triangles_intersect;
/// use meshguard_types::{Point3, Triangle};
///
/// // A vertical triangle piercing a horizontal one.
/// let horizontal = Triangle::new(
///     Point3::new(-1.0, -1.0, 0.0),
///     Point3::new(1.0, -1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
/// let vertical = Triangle::new(
///     Point3::new(0.0, -0.5, -1.0),
///     Point3::new(0.0, 0.5, -1.0),
///     Point3::new(0.0, 0.0, 1.0),
/// );
/// assert!(triangles_intersect(&horizontal, &vertical, 1e-9).is_some());
/// ```
#[must_use]
pub fn triangles_intersect(t1: &Triangle, t2: &Triangle, epsilon: f64) -> Option<Point3<f64>> {
    let n1 = t1.normal()?;
    let n2 = t2.normal()?;

    // Signed distances of each triangle's vertices to the other's plane.
    let d1 = plane_distances(t1, &n2, &t2.a);
    if same_side(&d1, epsilon) {
        return None;
    }
    let d2 = plane_distances(t2, &n1, &t1.a);
    if same_side(&d2, epsilon) {
        return None;
    }

    let coplanar = d1.iter().all(|d| d.abs() <= epsilon);
    if coplanar {
        return coplanar_overlap(t1, t2, &n1, epsilon);
    }

    // Each triangle crosses the other's plane in a segment; both segments
    // lie on the planes' intersection line.
    let seg1 = plane_crossing_segment(t1, &d1, epsilon)?;
    let seg2 = plane_crossing_segment(t2, &d2, epsilon)?;

    let line_dir = n1.cross(&n2).normalize();
    // Raw projections of seg1's endpoints keep their correspondence so the
    // contact point can be reconstructed on seg1 afterwards.
    let s0 = line_dir.dot(&seg1.0.coords);
    let s1 = line_dir.dot(&seg1.1.coords);
    let (a1, b1) = if s0 <= s1 { (s0, s1) } else { (s1, s0) };
    let (a2, b2) = project_interval(&seg2, &line_dir);

    let lo = a1.max(a2);
    let hi = b1.min(b2);
    if hi - lo <= epsilon {
        return None;
    }

    // Midpoint of the shared interval, reconstructed on seg1.
    let mid = (lo + hi) * 0.5;
    let span = s1 - s0;
    let t = if span.abs() > f64::EPSILON {
        (mid - s0) / span
    } else {
        0.5
    };
    Some(seg1.0 + (seg1.1 - seg1.0) * t)
}

/// Signed distances of a triangle's vertices to the plane through `origin`
/// with unit normal `normal`.
fn plane_distances(tri: &Triangle, normal: &Vector3<f64>, origin: &Point3<f64>) -> [f64; 3] {
    [
        normal.dot(&(tri.a - origin)),
        normal.dot(&(tri.b - origin)),
        normal.dot(&(tri.c - origin)),
    ]
}

/// Whether all distances are strictly on one side of the plane.
fn same_side(dists: &[f64; 3], epsilon: f64) -> bool {
    dists.iter().all(|&d| d > epsilon) || dists.iter().all(|&d| d < -epsilon)
}

/// The segment where a triangle crosses a plane, given its vertex distances.
fn plane_crossing_segment(
    tri: &Triangle,
    dists: &[f64; 3],
    epsilon: f64,
) -> Option<(Point3<f64>, Point3<f64>)> {
    let verts = tri.vertices();
    let mut points: Vec<Point3<f64>> = Vec::with_capacity(2);

    // Vertices lying on the plane are crossing points themselves.
    for (v, &d) in verts.iter().zip(dists.iter()) {
        if d.abs() <= epsilon {
            points.push(*v);
        }
    }

    // Edges whose endpoints straddle the plane contribute an interpolated
    // crossing point.
    for (i, j) in [(0, 1), (1, 2), (2, 0)] {
        let (di, dj) = (dists[i], dists[j]);
        if (di > epsilon && dj < -epsilon) || (di < -epsilon && dj > epsilon) {
            let t = di / (di - dj);
            points.push(verts[i] + (verts[j] - verts[i]) * t);
        }
    }

    match points.len() {
        0 | 1 => None,
        _ => Some((points[0], points[1])),
    }
}

/// Project a segment onto a direction, returning the ordered interval.
fn project_interval(seg: &(Point3<f64>, Point3<f64>), dir: &Vector3<f64>) -> (f64, f64) {
    let a = dir.dot(&seg.0.coords);
    let b = dir.dot(&seg.1.coords);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Overlap test for coplanar triangles, projected to 2D.
fn coplanar_overlap(
    t1: &Triangle,
    t2: &Triangle,
    normal: &Vector3<f64>,
    epsilon: f64,
) -> Option<Point3<f64>> {
    let drop_axis = dominant_axis(normal);
    let p1: [(f64, f64); 3] = [
        project_2d(&t1.a, drop_axis),
        project_2d(&t1.b, drop_axis),
        project_2d(&t1.c, drop_axis),
    ];
    let p2: [(f64, f64); 3] = [
        project_2d(&t2.a, drop_axis),
        project_2d(&t2.b, drop_axis),
        project_2d(&t2.c, drop_axis),
    ];
    let v1 = t1.vertices();
    let v2 = t2.vertices();

    // Any properly crossing edge pair proves overlap.
    for i in 0..3 {
        let (s1a, s1b) = (p1[i], p1[(i + 1) % 3]);
        for j in 0..3 {
            let (s2a, s2b) = (p2[j], p2[(j + 1) % 3]);
            if let Some(t) = segment_crossing_param(s1a, s1b, s2a, s2b, epsilon) {
                let (a3, b3) = (v1[i], v1[(i + 1) % 3]);
                return Some(a3 + (b3 - a3) * t);
            }
        }
    }

    // Full containment: one triangle strictly inside the other.
    if point_in_triangle_2d(p1[0], &p2, epsilon) {
        return Some(v1[0]);
    }
    if point_in_triangle_2d(p2[0], &p1, epsilon) {
        return Some(v2[0]);
    }

    None
}

/// Axis index of the normal's dominant component.
fn dominant_axis(n: &Vector3<f64>) -> usize {
    let (ax, ay, az) = (n.x.abs(), n.y.abs(), n.z.abs());
    if ax >= ay && ax >= az {
        0
    } else if ay >= az {
        1
    } else {
        2
    }
}

/// Drop one axis of a 3D point.
fn project_2d(p: &Point3<f64>, drop_axis: usize) -> (f64, f64) {
    match drop_axis {
        0 => (p.y, p.z),
        1 => (p.x, p.z),
        _ => (p.x, p.y),
    }
}

/// 2D orientation predicate (twice the signed triangle area).
fn orient_2d(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

/// Parameter along `a..b` where it properly crosses `c..d`, if it does.
fn segment_crossing_param(
    a: (f64, f64),
    b: (f64, f64),
    c: (f64, f64),
    d: (f64, f64),
    epsilon: f64,
) -> Option<f64> {
    let o1 = orient_2d(a, b, c);
    let o2 = orient_2d(a, b, d);
    let o3 = orient_2d(c, d, a);
    let o4 = orient_2d(c, d, b);

    // Proper crossing: each segment's endpoints strictly straddle the other.
    if (o1 > epsilon && o2 < -epsilon || o1 < -epsilon && o2 > epsilon)
        && (o3 > epsilon && o4 < -epsilon || o3 < -epsilon && o4 > epsilon)
    {
        return Some(o3 / (o3 - o4));
    }
    None
}

/// Whether `p` lies strictly inside the triangle `tri` (2D).
fn point_in_triangle_2d(p: (f64, f64), tri: &[(f64, f64); 3], epsilon: f64) -> bool {
    let o1 = orient_2d(tri[0], tri[1], p);
    let o2 = orient_2d(tri[1], tri[2], p);
    let o3 = orient_2d(tri[2], tri[0], p);
    (o1 > epsilon && o2 > epsilon && o3 > epsilon)
        || (o1 < -epsilon && o2 < -epsilon && o3 < -epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal() -> Triangle {
        Triangle::new(
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn piercing_triangle_intersects() {
        let vertical = Triangle::new(
            Point3::new(0.0, -0.5, -1.0),
            Point3::new(0.0, 0.5, -1.0),
            Point3::new(0.0, 0.0, 1.0),
        );
        let contact = triangles_intersect(&horizontal(), &vertical, 1e-9);
        assert!(contact.is_some());
        // Contact lies on the z=0 plane near the x=0 line.
        let p = contact.unwrap();
        assert!(p.z.abs() < 1e-9);
        assert!(p.x.abs() < 1e-9);
    }

    #[test]
    fn far_apart_triangles_do_not_intersect() {
        let far = Triangle::new(
            Point3::new(10.0, 10.0, 10.0),
            Point3::new(11.0, 10.0, 10.0),
            Point3::new(10.0, 11.0, 10.0),
        );
        assert!(triangles_intersect(&horizontal(), &far, 1e-9).is_none());
    }

    #[test]
    fn parallel_planes_do_not_intersect() {
        let above = Triangle::new(
            Point3::new(-1.0, -1.0, 1.0),
            Point3::new(1.0, -1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        );
        assert!(triangles_intersect(&horizontal(), &above, 1e-9).is_none());
    }

    #[test]
    fn vertex_touch_is_not_an_intersection() {
        // Apex resting exactly on the other triangle's plane.
        let touching = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.5, 0.0, 1.0),
            Point3::new(-0.5, 0.0, 1.0),
        );
        assert!(triangles_intersect(&horizontal(), &touching, 1e-9).is_none());
    }

    #[test]
    fn coplanar_overlapping_triangles_intersect() {
        let shifted = Triangle::new(
            Point3::new(-0.5, -0.5, 0.0),
            Point3::new(1.5, -0.5, 0.0),
            Point3::new(0.5, 1.5, 0.0),
        );
        assert!(triangles_intersect(&horizontal(), &shifted, 1e-9).is_some());
    }

    #[test]
    fn coplanar_disjoint_triangles_do_not_intersect() {
        let apart = Triangle::new(
            Point3::new(5.0, 5.0, 0.0),
            Point3::new(6.0, 5.0, 0.0),
            Point3::new(5.0, 6.0, 0.0),
        );
        assert!(triangles_intersect(&horizontal(), &apart, 1e-9).is_none());
    }

    #[test]
    fn coplanar_contained_triangle_intersects() {
        let inner = Triangle::new(
            Point3::new(-0.2, -0.5, 0.0),
            Point3::new(0.2, -0.5, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        );
        assert!(triangles_intersect(&horizontal(), &inner, 1e-9).is_some());
    }

    #[test]
    fn degenerate_input_is_rejected() {
        let sliver = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        assert!(triangles_intersect(&horizontal(), &sliver, 1e-9).is_none());
    }
}
