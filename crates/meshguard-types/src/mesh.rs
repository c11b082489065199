//! Normalized triangle mesh model.

use nalgebra::Point3;

use crate::{Aabb, InvalidMeshError, MeshResult, Triangle, Unit};

/// Hard limits enforced at mesh construction.
///
/// Limits bound worst-case CPU and memory before any analyzer runs. A mesh
/// exceeding them is rejected outright rather than analyzed slowly.
#[derive(Debug, Clone, Copy)]
pub struct MeshLimits {
    /// Maximum accepted vertex count.
    pub max_vertices: usize,
    /// Maximum accepted triangle count.
    pub max_triangles: usize,
}

impl Default for MeshLimits {
    fn default() -> Self {
        Self {
            max_vertices: 2_000_000,
            max_triangles: 2_000_000,
        }
    }
}

impl MeshLimits {
    /// Create limits with the given maxima.
    #[must_use]
    pub const fn new(max_vertices: usize, max_triangles: usize) -> Self {
        Self {
            max_vertices,
            max_triangles,
        }
    }
}

/// A validated, immutable triangle mesh.
///
/// This is the input shape every analyzer consumes: vertex positions plus
/// index triplets, already decoded from whatever file format the upload
/// arrived in. Construction checks the structural invariants once; after
/// that, every triangle index is known to be in range.
///
/// A `TriMesh` is owned by exactly one validation run and dropped when the
/// run's report has been assembled.
///
/// # Example
///
/// ```
/// use meshguard_types::{MeshLimits, TriMesh, Point3, Unit};
///
/// let mesh = TriMesh::from_buffers(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
///     Unit::Millimeters,
///     &MeshLimits::default(),
/// )
/// .unwrap();
///
/// assert_eq!(mesh.triangle_count(), 1);
/// assert!((mesh.surface_area() - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct TriMesh {
    vertices: Vec<Point3<f64>>,
    triangles: Vec<[u32; 3]>,
    unit: Unit,
}

impl TriMesh {
    /// Build a mesh from decoded vertex and triangle buffers.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMeshError`] if either buffer is empty, any triangle
    /// references an out-of-range vertex, or a count exceeds `limits`.
    pub fn from_buffers(
        vertices: Vec<Point3<f64>>,
        triangles: Vec<[u32; 3]>,
        unit: Unit,
        limits: &MeshLimits,
    ) -> MeshResult<Self> {
        if vertices.is_empty() {
            return Err(InvalidMeshError::NoVertices);
        }
        if triangles.is_empty() {
            return Err(InvalidMeshError::NoTriangles);
        }
        if vertices.len() > limits.max_vertices {
            return Err(InvalidMeshError::TooManyVertices {
                count: vertices.len(),
                max: limits.max_vertices,
            });
        }
        if triangles.len() > limits.max_triangles {
            return Err(InvalidMeshError::TooManyTriangles {
                count: triangles.len(),
                max: limits.max_triangles,
            });
        }

        let vertex_count = vertices.len();
        for (tri_idx, tri) in triangles.iter().enumerate() {
            for &index in tri {
                if index as usize >= vertex_count {
                    return Err(InvalidMeshError::IndexOutOfRange {
                        triangle: tri_idx,
                        index,
                        vertex_count,
                    });
                }
            }
        }

        Ok(Self {
            vertices,
            triangles,
            unit,
        })
    }

    /// Build a mesh from flat coordinate and index arrays.
    ///
    /// `positions` is `[x0, y0, z0, x1, y1, z1, ...]`; `indices` is
    /// `[a0, b0, c0, a1, b1, c1, ...]`. Convenience for callers holding
    /// decoder output in flat buffers.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`TriMesh::from_buffers`]; trailing elements
    /// that do not complete a triple are rejected as an empty buffer would
    /// be if nothing remains.
    pub fn from_raw(
        positions: &[f64],
        indices: &[u32],
        unit: Unit,
        limits: &MeshLimits,
    ) -> MeshResult<Self> {
        let vertices = positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        let triangles = indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        Self::from_buffers(vertices, triangles, unit, limits)
    }

    /// The declared unit of vertex coordinates.
    #[inline]
    #[must_use]
    pub const fn unit(&self) -> Unit {
        self.unit
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Vertex positions.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Triangle index triplets.
    #[inline]
    #[must_use]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Resolve triangle `index` to vertex positions.
    ///
    /// Indices were range-checked at construction, so this is total for
    /// `index < triangle_count()`.
    #[must_use]
    pub fn triangle(&self, index: usize) -> Option<Triangle> {
        self.triangles.get(index).map(|&[a, b, c]| {
            Triangle::new(
                self.vertices[a as usize],
                self.vertices[b as usize],
                self.vertices[c as usize],
            )
        })
    }

    /// Iterate over all triangles as resolved positions.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.triangles.iter().map(|&[a, b, c]| {
            Triangle::new(
                self.vertices[a as usize],
                self.vertices[b as usize],
                self.vertices[c as usize],
            )
        })
    }

    /// Bounding box of all vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }

    /// Signed volume by the divergence theorem.
    ///
    /// Sum of signed tetrahedra between each face and the origin. Positive
    /// for a closed mesh with outward normals; meaningless for open meshes.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let mut volume = 0.0;
        for &[a, b, c] in &self.triangles {
            let v0 = &self.vertices[a as usize];
            let v1 = &self.vertices[b as usize];
            let v2 = &self.vertices[c as usize];
            let cross_x = v1.y.mul_add(v2.z, -(v1.z * v2.y));
            let cross_y = v1.z.mul_add(v2.x, -(v1.x * v2.z));
            let cross_z = v1.x.mul_add(v2.y, -(v1.y * v2.x));
            volume += v0.z.mul_add(cross_z, v0.x.mul_add(cross_x, v0.y * cross_y));
        }
        volume / 6.0
    }

    /// Total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles().map(|t| t.area()).sum()
    }

    /// Mean triangle area.
    ///
    /// The degenerate-face threshold is expressed relative to this, so it
    /// adapts to the tessellation density of the model.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_triangle_area(&self) -> f64 {
        if self.triangles.is_empty() {
            0.0
        } else {
            self.surface_area() / self.triangles.len() as f64
        }
    }
}

/// A closed unit cube from (0,0,0) to (1,1,1), 8 vertices and 12 triangles.
///
/// Watertight, manifold, single component, outward CCW winding. The
/// canonical clean fixture for analyzer tests.
///
/// # Example
///
/// ```
/// use meshguard_types::unit_cube;
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.triangle_count(), 12);
/// assert!((cube.signed_volume() - 1.0).abs() < 1e-10);
/// ```
///
/// # Panics
///
/// Never panics; the buffers are statically valid.
#[must_use]
#[allow(clippy::missing_panics_doc)]
pub fn unit_cube() -> TriMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    ];
    let triangles = vec![
        // bottom (z = 0)
        [0, 2, 1],
        [0, 3, 2],
        // top (z = 1)
        [4, 5, 6],
        [4, 6, 7],
        // front (y = 0)
        [0, 1, 5],
        [0, 5, 4],
        // back (y = 1)
        [3, 7, 6],
        [3, 6, 2],
        // left (x = 0)
        [0, 4, 7],
        [0, 7, 3],
        // right (x = 1)
        [1, 2, 6],
        [1, 6, 5],
    ];
    match TriMesh::from_buffers(vertices, triangles, Unit::Millimeters, &MeshLimits::default()) {
        Ok(mesh) => mesh,
        Err(_) => unreachable!(),
    }
}
