//! Mesh metrics reported alongside issues.

use meshguard_types::TriMesh;
use serde::{Deserialize, Serialize};

/// Scalar facts about a mesh, always present in a report.
///
/// Metrics are computed whether or not issues were found; lengths are in
/// millimeters regardless of the mesh's declared unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metrics {
    /// Triangle count.
    pub triangles: usize,
    /// Vertex count.
    pub vertices: usize,
    /// Connected components of the triangle graph.
    pub components: usize,
    /// Bounding box extents `[x, y, z]` in millimeters.
    pub bbox_mm: [f64; 3],
    /// Enclosed volume in cubic millimeters; `None` (serialized as null)
    /// when the mesh is not watertight, because the signed sum is
    /// meaningless over an open surface.
    pub volume_mm3: Option<f64>,
    /// Total surface area in square millimeters.
    pub surface_area_mm2: f64,
    /// Unit label for the reported lengths. Always millimeters.
    pub units: String,
}

impl Metrics {
    /// Compute metrics for a mesh.
    ///
    /// `components` comes from the topology pass; `watertight` gates the
    /// volume.
    #[must_use]
    pub fn compute(mesh: &TriMesh, components: usize, watertight: bool) -> Self {
        let scale = mesh.unit().to_mm();
        let size = mesh.bounds().size();
        let volume_mm3 =
            watertight.then(|| mesh.signed_volume().abs() * scale * scale * scale);

        Self {
            triangles: mesh.triangle_count(),
            vertices: mesh.vertex_count(),
            components,
            bbox_mm: [size.x * scale, size.y * scale, size.z * scale],
            volume_mm3,
            surface_area_mm2: mesh.surface_area() * scale * scale,
            units: "mm".to_owned(),
        }
    }
}
