//! Triangle with concrete vertex positions.

use nalgebra::{Point3, Vector3};

use crate::Aabb;

/// A triangle resolved to actual vertex positions.
///
/// Analyzers work on `Triangle` values rather than index triplets so that
/// geometric predicates (area, normal, intersection) never touch the vertex
/// buffer directly.
///
/// Winding is counter-clockwise when viewed from outside; the normal
/// follows the right-hand rule.
///
/// # Example
///
/// ```
/// use meshguard_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
/// assert!((tri.area() - 0.5).abs() < 1e-12);
/// let n = tri.normal().unwrap();
/// assert!((n.z - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub a: Point3<f64>,
    /// Second vertex.
    pub b: Point3<f64>,
    /// Third vertex.
    pub c: Point3<f64>,
}

impl Triangle {
    /// Create a triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self { a, b, c }
    }

    /// Cross product of the two edges from `a`.
    ///
    /// Direction is the face normal; magnitude is twice the area.
    #[inline]
    #[must_use]
    pub fn scaled_normal(&self) -> Vector3<f64> {
        (self.b - self.a).cross(&(self.c - self.a))
    }

    /// Unit face normal, or `None` for a (near-)zero-area triangle.
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let n = self.scaled_normal();
        let len_sq = n.norm_squared();
        if len_sq > f64::EPSILON {
            Some(n / len_sq.sqrt())
        } else {
            None
        }
    }

    /// Triangle area.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.scaled_normal().norm() * 0.5
    }

    /// Center of mass.
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::new(
            (self.a.x + self.b.x + self.c.x) / 3.0,
            (self.a.y + self.b.y + self.c.y) / 3.0,
            (self.a.z + self.b.z + self.c.z) / 3.0,
        )
    }

    /// Bounding box of the three vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let mut aabb = Aabb::empty();
        aabb.expand_to_include(&self.a);
        aabb.expand_to_include(&self.b);
        aabb.expand_to_include(&self.c);
        aabb
    }

    /// Whether the triangle's area is below `area_epsilon`.
    ///
    /// Covers both coincident and collinear vertices; the caller chooses an
    /// epsilon relative to the mesh's mean triangle area.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self, area_epsilon: f64) -> bool {
        self.area() < area_epsilon
    }

    /// Vertices as an array.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f64>; 3] {
        [self.a, self.b, self.c]
    }
}
