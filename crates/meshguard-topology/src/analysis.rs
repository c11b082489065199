//! Topology analysis entry point.

use hashbrown::HashMap;
use meshguard_spatial::PointGrid;
use meshguard_types::TriMesh;
use tracing::{debug, info};

use crate::adjacency::EdgeAdjacency;
use crate::components::{triangle_component_count, UnionFind};

/// Tunable thresholds for topology analysis.
#[derive(Debug, Clone)]
pub struct TopologyParams {
    /// Distance below which two vertices count as duplicates.
    ///
    /// `None` derives the epsilon from the mesh: 1e-6 times the bounding
    /// box diagonal, so the tolerance scales with the model.
    pub duplicate_epsilon: Option<f64>,

    /// A triangle is degenerate when its area is below this fraction of
    /// the mesh's mean triangle area.
    pub degenerate_area_factor: f64,
}

impl Default for TopologyParams {
    fn default() -> Self {
        Self {
            duplicate_epsilon: None,
            degenerate_area_factor: 1e-6,
        }
    }
}

/// Structural facts about one mesh, gathered in a single pass.
///
/// Pure data: the validation pipeline decides which of these counts become
/// issues and at which severity.
#[derive(Debug, Clone)]
pub struct TopologyReport {
    /// Total number of vertices.
    pub vertex_count: usize,
    /// Total number of triangles.
    pub triangle_count: usize,
    /// Total number of distinct edges.
    pub edge_count: usize,

    /// Edges incident to exactly one triangle.
    pub boundary_edge_count: usize,
    /// Edges incident to three or more triangles.
    pub non_manifold_edge_count: usize,
    /// Vertices whose incident triangles form more than one fan.
    pub non_manifold_vertex_count: usize,
    /// Triangles with area below the degenerate threshold.
    pub degenerate_triangle_count: usize,
    /// Groups of two or more vertices within the duplicate epsilon.
    pub duplicate_vertex_groups: usize,
    /// Connected components of the triangle graph.
    pub component_count: usize,

    /// The epsilon actually used for duplicate grouping.
    pub duplicate_epsilon: f64,

    /// No boundary edges.
    pub is_watertight: bool,
    /// No non-manifold edges and no non-manifold vertices.
    pub is_manifold: bool,
}

/// Run all structural checks on a mesh.
///
/// Builds the edge adjacency once and derives watertightness,
/// manifoldness, duplicate-vertex groups, degenerate triangles and
/// connected components from it.
///
/// # Example
///
/// ```
/// use meshguard_topology::{analyze_topology, TopologyParams};
/// use meshguard_types::unit_cube;
///
/// let report = analyze_topology(&unit_cube(), &TopologyParams::default());
/// assert!(report.is_watertight);
/// assert!(report.is_manifold);
/// assert_eq!(report.component_count, 1);
/// ```
#[must_use]
pub fn analyze_topology(mesh: &TriMesh, params: &TopologyParams) -> TopologyReport {
    info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "starting topology analysis"
    );

    let adjacency = EdgeAdjacency::build(mesh.faces());

    let duplicate_epsilon = params
        .duplicate_epsilon
        .unwrap_or_else(|| mesh.bounds().diagonal() * 1e-6);
    let duplicate_vertex_groups = count_duplicate_groups(mesh, duplicate_epsilon);

    let degenerate_threshold = mesh.mean_triangle_area() * params.degenerate_area_factor;
    let degenerate_triangle_count = mesh
        .triangles()
        .filter(|t| t.is_degenerate(degenerate_threshold))
        .count();

    let non_manifold_vertex_count = count_non_manifold_vertices(&adjacency, mesh.faces());
    let component_count = triangle_component_count(&adjacency, mesh.triangle_count());

    let report = TopologyReport {
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
        edge_count: adjacency.edge_count(),
        boundary_edge_count: adjacency.boundary_edge_count(),
        non_manifold_edge_count: adjacency.non_manifold_edge_count(),
        non_manifold_vertex_count,
        degenerate_triangle_count,
        duplicate_vertex_groups,
        component_count,
        duplicate_epsilon,
        is_watertight: adjacency.is_watertight(),
        is_manifold: adjacency.is_manifold() && non_manifold_vertex_count == 0,
    };

    debug!(
        boundary_edges = report.boundary_edge_count,
        non_manifold_edges = report.non_manifold_edge_count,
        components = report.component_count,
        "topology analysis complete"
    );

    report
}

/// Count groups of vertices closer together than `epsilon`.
fn count_duplicate_groups(mesh: &TriMesh, epsilon: f64) -> usize {
    if epsilon <= 0.0 {
        return 0;
    }
    PointGrid::cluster(mesh.vertices(), epsilon)
        .iter()
        .filter(|group| group.len() >= 2)
        .count()
}

/// Count vertices whose incident triangles do not form a single fan.
///
/// For each vertex, incident triangles are merged when they share an edge
/// through that vertex; more than one resulting group means two surface
/// sheets meet only at the vertex.
#[allow(clippy::cast_possible_truncation)]
fn count_non_manifold_vertices(adjacency: &EdgeAdjacency, faces: &[[u32; 3]]) -> usize {
    let mut count = 0;

    for v in adjacency.referenced_vertices() {
        let incident = adjacency.triangles_for_vertex(v);
        if incident.len() < 2 {
            continue;
        }

        let slot_of: HashMap<u32, u32> = incident
            .iter()
            .enumerate()
            .map(|(slot, &tri)| (tri, slot as u32))
            .collect();
        let mut fans = UnionFind::new(incident.len());

        for (slot, &tri) in incident.iter().enumerate() {
            for &u in &faces[tri as usize] {
                if u == v {
                    continue;
                }
                let Some(shared) = adjacency.triangles_for_edge(v, u) else {
                    continue;
                };
                for &other in shared {
                    if let Some(&other_slot) = slot_of.get(&other) {
                        fans.union(slot as u32, other_slot);
                    }
                }
            }
        }

        if fans.set_count() > 1 {
            count += 1;
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshguard_types::{unit_cube, MeshLimits, Point3, TriMesh, Unit};

    fn mesh_from(vertices: Vec<Point3<f64>>, triangles: Vec<[u32; 3]>) -> TriMesh {
        TriMesh::from_buffers(vertices, triangles, Unit::Millimeters, &MeshLimits::default())
            .unwrap()
    }

    #[test]
    fn clean_cube_report() {
        let report = analyze_topology(&unit_cube(), &TopologyParams::default());

        assert_eq!(report.triangle_count, 12);
        assert_eq!(report.edge_count, 18);
        assert_eq!(report.boundary_edge_count, 0);
        assert_eq!(report.non_manifold_edge_count, 0);
        assert_eq!(report.non_manifold_vertex_count, 0);
        assert_eq!(report.degenerate_triangle_count, 0);
        assert_eq!(report.duplicate_vertex_groups, 0);
        assert_eq!(report.component_count, 1);
        assert!(report.is_watertight);
        assert!(report.is_manifold);
    }

    #[test]
    fn cube_with_hole_has_three_boundary_edges() {
        let cube = unit_cube();
        let mut faces = cube.faces().to_vec();
        faces.pop();
        let holed = mesh_from(cube.vertices().to_vec(), faces);

        let report = analyze_topology(&holed, &TopologyParams::default());
        assert_eq!(report.boundary_edge_count, 3);
        assert!(!report.is_watertight);
    }

    #[test]
    fn duplicate_vertices_are_grouped() {
        let cube = unit_cube();
        let mut vertices = cube.vertices().to_vec();
        // Re-add vertex 0 shifted by far less than the epsilon.
        let dup = vertices[0] + meshguard_types::Vector3::new(1e-9, 0.0, 0.0);
        vertices.push(dup);
        let mut faces = cube.faces().to_vec();
        // Reference the duplicate so it participates in the mesh.
        faces.push([8, 1, 3]);
        let mesh = mesh_from(vertices, faces);

        let report = analyze_topology(&mesh, &TopologyParams::default());
        assert_eq!(report.duplicate_vertex_groups, 1);
    }

    #[test]
    fn collinear_triangle_is_degenerate() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
        ];
        // One real triangle, one collinear sliver.
        let mesh = mesh_from(vertices, vec![[0, 1, 2], [1, 3, 4]]);

        let report = analyze_topology(&mesh, &TopologyParams::default());
        assert_eq!(report.degenerate_triangle_count, 1);
    }

    #[test]
    fn two_cubes_are_two_components() {
        let cube = unit_cube();
        let mut vertices = cube.vertices().to_vec();
        let mut faces = cube.faces().to_vec();
        let offset = meshguard_types::Vector3::new(5.0, 0.0, 0.0);
        #[allow(clippy::cast_possible_truncation)]
        let base = vertices.len() as u32;
        for v in cube.vertices() {
            vertices.push(v + offset);
        }
        for f in cube.faces() {
            faces.push([f[0] + base, f[1] + base, f[2] + base]);
        }
        let mesh = mesh_from(vertices, faces);

        let report = analyze_topology(&mesh, &TopologyParams::default());
        assert_eq!(report.component_count, 2);
        assert!(report.is_watertight);
    }

    #[test]
    fn bowtie_vertex_is_non_manifold() {
        // Two triangles meeting only at vertex 0.
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
        ];
        let mesh = mesh_from(vertices, vec![[0, 1, 2], [0, 3, 4]]);

        let report = analyze_topology(&mesh, &TopologyParams::default());
        assert_eq!(report.non_manifold_vertex_count, 1);
        assert!(!report.is_manifold);
    }

    #[test]
    fn explicit_epsilon_overrides_derived() {
        let cube = unit_cube();
        let params = TopologyParams {
            // Huge epsilon groups every cube corner together.
            duplicate_epsilon: Some(10.0),
            ..TopologyParams::default()
        };
        let report = analyze_topology(&cube, &params);
        assert_eq!(report.duplicate_vertex_groups, 1);
        assert!((report.duplicate_epsilon - 10.0).abs() < f64::EPSILON);
    }
}
