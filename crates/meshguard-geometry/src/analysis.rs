//! Self-intersection detection over BVH candidate pairs.

use meshguard_spatial::Bvh;
use meshguard_types::{Point3, Triangle};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::tritri::triangles_intersect;

/// Tunables for self-intersection detection.
#[derive(Debug, Clone)]
pub struct IntersectionParams {
    /// Geometric tolerance for the triangle-triangle test.
    pub epsilon: f64,
    /// Maximum number of contact points retained as evidence.
    pub max_samples: usize,
}

impl Default for IntersectionParams {
    fn default() -> Self {
        Self {
            epsilon: 1e-9,
            max_samples: 100,
        }
    }
}

/// Outcome of the self-intersection analysis.
#[derive(Debug, Clone, Default)]
pub struct IntersectionReport {
    /// Number of properly intersecting triangle pairs.
    pub pair_count: usize,
    /// Contact points, capped at `max_samples`.
    pub sample_points: Vec<Point3<f64>>,
    /// Whether the sample list was capped.
    pub truncated: bool,
}

impl IntersectionReport {
    /// Whether any intersecting pair was found.
    #[must_use]
    pub fn has_intersections(&self) -> bool {
        self.pair_count > 0
    }
}

/// Find all properly intersecting triangle pairs.
///
/// Candidates come from the shared BVH; pairs sharing a vertex index are
/// adjacent by construction and skipped. Each surviving pair goes through
/// the exact test in [`triangles_intersect`]. Pairs are examined in index
/// order, so the report is deterministic for a given mesh.
///
/// `faces` and `triangles` must describe the same mesh the BVH was built
/// over.
///
/// # Example
///
/// ```
/// use meshguard_geometry::{find_self_intersections, IntersectionParams};
/// use meshguard_spatial::Bvh;
/// use meshguard_types::unit_cube;
///
/// let cube = unit_cube();
/// let triangles: Vec<_> = cube.triangles().collect();
/// let bvh = Bvh::build(&triangles, 1e-9).unwrap();
///
/// let report = find_self_intersections(
///     cube.faces(),
///     &triangles,
///     &bvh,
///     &IntersectionParams::default(),
/// );
/// assert!(!report.has_intersections());
/// ```
#[must_use]
pub fn find_self_intersections(
    faces: &[[u32; 3]],
    triangles: &[Triangle],
    bvh: &Bvh,
    params: &IntersectionParams,
) -> IntersectionReport {
    info!(triangles = triangles.len(), "starting self-intersection scan");

    // Per-triangle pass: candidates with a higher index keep each pair
    // unique; contact points collect into per-triangle vectors so the
    // parallel pass stays allocation-local.
    let contacts: Vec<Vec<Point3<f64>>> = (0..triangles.len())
        .into_par_iter()
        .map(|i| {
            let mut candidates = Vec::new();
            bvh.overlap_candidates(&triangles[i].bounds(), &mut candidates);

            let mut found = Vec::new();
            for j in candidates {
                if j <= i || shares_vertex(&faces[i], &faces[j]) {
                    continue;
                }
                if let Some(contact) =
                    triangles_intersect(&triangles[i], &triangles[j], params.epsilon)
                {
                    found.push(contact);
                }
            }
            found
        })
        .collect();

    let mut report = IntersectionReport::default();
    for contact_list in contacts {
        for contact in contact_list {
            report.pair_count += 1;
            if report.sample_points.len() < params.max_samples {
                report.sample_points.push(contact);
            } else {
                report.truncated = true;
            }
        }
    }

    if report.pair_count > 0 {
        warn!(
            pairs = report.pair_count,
            truncated = report.truncated,
            "self-intersections found"
        );
    }

    report
}

/// Whether two faces share any vertex index.
fn shares_vertex(f1: &[u32; 3], f2: &[u32; 3]) -> bool {
    f1.iter().any(|a| f2.contains(a))
}
