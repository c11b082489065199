//! The staged validation pipeline.

use std::time::{Duration, Instant};

use chrono::Utc;
use meshguard_geometry::find_self_intersections;
use meshguard_spatial::Bvh;
use meshguard_thickness::analyze_thickness;
use meshguard_topology::{analyze_topology, TopologyReport};
use meshguard_types::{InvalidMeshError, Point3, TriMesh, Triangle, Unit};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ValidatorConfig;
use crate::issues::{Issue, IssueCode};
use crate::metrics::Metrics;
use crate::report::{Decision, Report};

/// Margin added to BVH leaf boxes for numerical robustness.
const BVH_MARGIN: f64 = 1e-9;

/// Wall-clock budget for one run, checked at stage boundaries only.
///
/// Cancellation never interrupts a stage mid-loop; a stage either runs to
/// completion or is skipped entirely and marked in the report.
#[derive(Debug, Clone, Copy)]
struct Deadline {
    start: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    fn new(timeout_ms: u64) -> Self {
        Self {
            start: Instant::now(),
            limit: (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms)),
        }
    }

    fn expired(&self) -> bool {
        self.limit.is_some_and(|limit| self.start.elapsed() >= limit)
    }
}

/// The validation engine: one instance per configuration, reusable across
/// requests.
///
/// Each call to [`Validator::validate`] is an independent unit of work; the
/// mesh, adjacency, BVH and sample buffers live only for that call.
///
/// # Example
///
/// ```
/// use meshguard_types::{unit_cube, Unit};
/// use meshguard_validate::{Decision, Validator, ValidatorConfig};
///
/// let validator = Validator::new(ValidatorConfig::default());
/// let cube = unit_cube();
/// let report = validator
///     .validate(
///         cube.vertices().to_vec(),
///         cube.faces().to_vec(),
///         Unit::Millimeters,
///         "cube.stl",
///     )
///     .unwrap();
///
/// assert_eq!(report.decision, Decision::Allow);
/// assert!(report.errors.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Create a validator with the given configuration.
    #[must_use]
    pub const fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate decoded mesh buffers end to end.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMeshError`] when the buffers fail structural
    /// validation (empty, index out of range, over the configured limits).
    /// Structural failures abort before any analyzer runs and produce no
    /// report, since metrics over a broken index buffer would be
    /// meaningless.
    pub fn validate(
        &self,
        vertices: Vec<Point3<f64>>,
        triangles: Vec<[u32; 3]>,
        unit: Unit,
        filename: &str,
    ) -> Result<Report, InvalidMeshError> {
        let deadline = Deadline::new(self.config.timeout_ms);
        let mesh = TriMesh::from_buffers(vertices, triangles, unit, &self.config.mesh_limits())?;
        Ok(self.run_pipeline(&mesh, filename, deadline))
    }

    /// Validate an already-constructed mesh.
    #[must_use]
    pub fn validate_mesh(&self, mesh: &TriMesh, filename: &str) -> Report {
        let deadline = Deadline::new(self.config.timeout_ms);
        self.run_pipeline(mesh, filename, deadline)
    }

    fn run_pipeline(&self, mesh: &TriMesh, filename: &str, deadline: Deadline) -> Report {
        info!(
            filename,
            triangles = mesh.triangle_count(),
            vertices = mesh.vertex_count(),
            "starting validation"
        );

        let mut issues: Vec<Issue> = Vec::new();
        let mut notes: Vec<String> = Vec::new();
        let mut skipped_stages: Vec<&str> = Vec::new();

        // Stage 1: topology. Cheap and structural, always runs.
        let topology = analyze_topology(mesh, &self.config.topology_params());
        self.push_topology_issues(&mut issues, &topology);

        let to_mm = mesh.unit().to_mm();

        // The wall-thickness skip is policy, not failure: inward rays
        // escape through holes, so the estimate is undefined on open
        // surfaces.
        let thickness_applicable = topology.is_watertight;
        if !thickness_applicable {
            notes.push(
                "wall thickness analysis skipped: mesh is not watertight, so ray-cast \
                 thickness is unreliable"
                    .to_owned(),
            );
        }

        // Stage 2: self-intersection. Builds the spatial index shared with
        // stage 3.
        let mut spatial: Option<(Vec<Triangle>, Bvh)> = None;
        if deadline.expired() {
            skipped_stages.push("self-intersection");
            if thickness_applicable {
                skipped_stages.push("wall thickness");
            }
        } else {
            let triangles: Vec<Triangle> = mesh.triangles().collect();
            match Bvh::build(&triangles, BVH_MARGIN) {
                Some(bvh) => spatial = Some((triangles, bvh)),
                None => {
                    // Detection failure is reported, never propagated as a
                    // crash or silently dropped.
                    issues.push(Issue::warning(
                        IssueCode::TimedOut,
                        "geometric analysis skipped: spatial index could not be built",
                    ));
                }
            }

            if let Some((triangles, bvh)) = spatial.as_ref() {
                let intersections = find_self_intersections(
                    mesh.faces(),
                    triangles,
                    bvh,
                    &self.config.intersection_params(),
                );
                if intersections.has_intersections() {
                    let locations: Vec<[f64; 3]> = intersections
                        .sample_points
                        .iter()
                        .map(|p| [p.x * to_mm, p.y * to_mm, p.z * to_mm])
                        .collect();
                    issues.push(
                        Issue::error(
                            IssueCode::SelfIntersection,
                            format!(
                                "Found {} self-intersecting triangle pair(s)",
                                intersections.pair_count
                            ),
                        )
                        .with_count(intersections.pair_count as u64)
                        .with_locations(locations),
                    );
                }
            }

            // Stage 3: wall thickness, reusing the index built above.
            if thickness_applicable {
                if deadline.expired() {
                    skipped_stages.push("wall thickness");
                } else if let Some((triangles, bvh)) = spatial.as_ref() {
                    let thickness =
                        analyze_thickness(mesh, triangles, bvh, &self.config.thickness_params());
                    if thickness.has_thin_regions() {
                        let locations: Vec<[f64; 3]> = thickness
                            .region_centers
                            .iter()
                            .map(|p| [p.x * to_mm, p.y * to_mm, p.z * to_mm])
                            .collect();
                        issues.push(
                            Issue::warning(
                                IssueCode::ThinWall,
                                format!(
                                    "Detected {} region(s) with thickness below {}mm \
                                     (minimum {:.3}mm)",
                                    thickness.region_count,
                                    self.config.thin_wall_threshold_mm,
                                    thickness.min_thickness_mm
                                ),
                            )
                            .with_count(thickness.region_count as u64)
                            .with_locations(locations),
                        );
                    }
                }
            }
        }

        if !skipped_stages.is_empty() {
            issues.push(
                Issue::warning(
                    IssueCode::TimedOut,
                    format!(
                        "validation deadline exceeded; skipped stages: {}",
                        skipped_stages.join(", ")
                    ),
                )
                .with_count(skipped_stages.len() as u64),
            );
        }

        // Metrics are reported regardless of what the analyzers found.
        let metrics = Metrics::compute(mesh, topology.component_count, topology.is_watertight);
        let decision = Decision::from_issues(&issues);

        let (errors, warnings): (Vec<Issue>, Vec<Issue>) =
            issues.into_iter().partition(Issue::is_error);

        let elapsed_ms = deadline.start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            decision = decision.as_str(),
            errors = errors.len(),
            warnings = warnings.len(),
            elapsed_ms,
            "validation complete"
        );

        Report {
            model_id: Uuid::new_v4().to_string(),
            filename: filename.to_owned(),
            metrics,
            errors,
            warnings,
            decision,
            processing_time_ms: elapsed_ms,
            timestamp: Utc::now().to_rfc3339(),
            notes,
        }
    }

    /// Map topology counts onto issues, per configuration policy.
    fn push_topology_issues(&self, issues: &mut Vec<Issue>, topology: &TopologyReport) {
        if topology.boundary_edge_count > 0 {
            issues.push(
                Issue::error(
                    IssueCode::NotWatertight,
                    format!(
                        "Mesh is not watertight ({} boundary edges)",
                        topology.boundary_edge_count
                    ),
                )
                .with_count(topology.boundary_edge_count as u64),
            );
        }

        let non_manifold = topology.non_manifold_edge_count + topology.non_manifold_vertex_count;
        if non_manifold > 0 {
            issues.push(
                Issue::error(
                    IssueCode::NonManifold,
                    format!(
                        "Mesh has non-manifold geometry ({} edges, {} vertices)",
                        topology.non_manifold_edge_count, topology.non_manifold_vertex_count
                    ),
                )
                .with_count(non_manifold as u64),
            );
        }

        if topology.duplicate_vertex_groups > 0 {
            issues.push(
                Issue::warning(
                    IssueCode::DuplicateVertices,
                    format!(
                        "Found {} group(s) of vertices within {:.2e} of each other",
                        topology.duplicate_vertex_groups, topology.duplicate_epsilon
                    ),
                )
                .with_count(topology.duplicate_vertex_groups as u64),
            );
        }

        if topology.degenerate_triangle_count > 0 {
            issues.push(
                Issue::warning(
                    IssueCode::DegenerateFace,
                    format!(
                        "Found {} degenerate face(s)",
                        topology.degenerate_triangle_count
                    ),
                )
                .with_count(topology.degenerate_triangle_count as u64),
            );
        }

        if topology.component_count > 1 && self.config.downgrade_multi_component_to_warning {
            issues.push(
                Issue::warning(
                    IssueCode::MultipleComponents,
                    format!(
                        "Mesh has {} disconnected components",
                        topology.component_count
                    ),
                )
                .with_count(topology.component_count as u64),
            );
        }
    }
}
