//! Wall thickness estimation by inward ray casting.

use meshguard_spatial::{Bvh, PointGrid};
use meshguard_types::{Point3, TriMesh, Triangle};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::params::ThicknessParams;
use crate::result::ThicknessReport;
use crate::sampling::sample_surface;

/// Estimate local wall thickness over the mesh surface.
///
/// Sample points are distributed over the surface (area-weighted, seeded);
/// from each sample a ray is cast along the inward normal and the distance
/// to the next surface hit approximates the local wall thickness. Samples
/// below the threshold are clustered into regions for reporting.
///
/// The caller is responsible for only invoking this on watertight meshes;
/// on an open surface the inward ray may escape through a hole and the
/// estimate is meaningless.
///
/// `triangles` and `bvh` must describe `mesh`; both are shared with the
/// self-intersection analyzer.
///
/// # Example
///
/// ```
/// use meshguard_spatial::Bvh;
/// use meshguard_thickness::{analyze_thickness, ThicknessParams};
/// use meshguard_types::unit_cube;
///
/// let cube = unit_cube();
/// let triangles: Vec<_> = cube.triangles().collect();
/// let bvh = Bvh::build(&triangles, 1e-9).unwrap();
///
/// // A 1 mm cube is everywhere thicker than 0.6 mm.
/// let report = analyze_thickness(&cube, &triangles, &bvh, &ThicknessParams::default());
/// assert!(!report.has_thin_regions());
/// ```
#[must_use]
pub fn analyze_thickness(
    mesh: &TriMesh,
    triangles: &[Triangle],
    bvh: &Bvh,
    params: &ThicknessParams,
) -> ThicknessReport {
    info!(
        samples = params.sample_count,
        threshold_mm = params.min_thickness_mm,
        "starting wall thickness analysis"
    );

    let samples = sample_surface(triangles, params.sample_count, params.seed);
    if samples.is_empty() {
        return ThicknessReport::empty(params.sample_count);
    }

    let to_mm = mesh.unit().to_mm();
    let threshold_model = params.min_thickness_mm / to_mm;
    let max_distance = if params.max_ray_distance > 0.0 {
        params.max_ray_distance
    } else {
        f64::MAX
    };

    // Each sample measures independently; the inward ray skips its own
    // source face so it cannot terminate at distance zero.
    let measurements: Vec<(usize, f64)> = samples
        .par_iter()
        .enumerate()
        .filter_map(|(idx, sample)| {
            let inward = -sample.normal;
            bvh.cast_ray(
                &sample.position,
                &inward,
                triangles,
                max_distance,
                params.epsilon,
                &|tri| tri == sample.face,
            )
            .map(|hit| (idx, hit.distance))
        })
        .collect();

    let samples_hit = measurements.len();
    let mut min_thickness_model = f64::INFINITY;
    let mut thin_positions: Vec<Point3<f64>> = Vec::new();
    for &(idx, distance) in &measurements {
        min_thickness_model = min_thickness_model.min(distance);
        if distance < threshold_model {
            thin_positions.push(samples[idx].position);
        }
    }

    // Neighboring thin samples describe the same thin wall; cluster them
    // so the report counts regions, not sample points.
    let cluster_radius = threshold_model * 2.0;
    let clusters = if thin_positions.is_empty() {
        Vec::new()
    } else {
        PointGrid::cluster(&thin_positions, cluster_radius)
    };

    let region_count = clusters.len();
    let truncated = region_count > params.max_regions;
    let region_centers: Vec<Point3<f64>> = clusters
        .iter()
        .take(params.max_regions)
        .map(|members| centroid_of(&thin_positions, members))
        .collect();

    let report = ThicknessReport {
        samples_requested: params.sample_count,
        samples_cast: samples.len(),
        samples_hit,
        min_thickness_mm: min_thickness_model * to_mm,
        thin_sample_count: thin_positions.len(),
        region_count,
        region_centers,
        truncated,
    };

    if report.has_thin_regions() {
        warn!(
            regions = report.region_count,
            min_mm = format!("{:.3}", report.min_thickness_mm),
            "thin walls below threshold"
        );
    }

    report
}

/// Average position of a cluster's members.
#[allow(clippy::cast_precision_loss)]
fn centroid_of(points: &[Point3<f64>], members: &[usize]) -> Point3<f64> {
    let mut sum = Point3::new(0.0, 0.0, 0.0);
    for &idx in members {
        sum.x += points[idx].x;
        sum.y += points[idx].y;
        sum.z += points[idx].z;
    }
    let n = members.len().max(1) as f64;
    Point3::new(sum.x / n, sum.y / n, sum.z / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshguard_types::{unit_cube, MeshLimits, TriMesh, Unit};

    /// Closed axis-aligned box with the given extents, built by scaling
    /// the unit cube's connectivity.
    fn box_mesh(w: f64, h: f64, d: f64) -> TriMesh {
        let cube = unit_cube();
        let vertices = cube
            .vertices()
            .iter()
            .map(|v| Point3::new(v.x * w, v.y * h, v.z * d))
            .collect();
        TriMesh::from_buffers(
            vertices,
            cube.faces().to_vec(),
            Unit::Millimeters,
            &MeshLimits::default(),
        )
        .unwrap()
    }

    fn analyze(mesh: &TriMesh, params: &ThicknessParams) -> ThicknessReport {
        let triangles: Vec<Triangle> = mesh.triangles().collect();
        let bvh = Bvh::build(&triangles, 1e-9).unwrap();
        analyze_thickness(mesh, &triangles, &bvh, params)
    }

    #[test]
    fn unit_cube_is_thick_enough() {
        let cube = unit_cube();
        let report = analyze(&cube, &ThicknessParams::default());

        assert!(report.samples_hit > 0);
        assert!(!report.has_thin_regions());
        // Opposite faces are 1 mm apart; the minimum cannot be below the
        // shortest cube crossing.
        assert!(report.min_thickness_mm <= 1.0 + 1e-9);
    }

    #[test]
    fn thin_slab_is_flagged() {
        // 10 x 10 x 0.3 mm slab against the default 0.6 mm threshold.
        let slab = box_mesh(10.0, 10.0, 0.3);
        let report = analyze(&slab, &ThicknessParams::default());

        assert!(report.has_thin_regions());
        assert!(report.thin_sample_count > 0);
        assert!(
            (report.min_thickness_mm - 0.3).abs() < 0.05,
            "expected min ≈ 0.3, got {}",
            report.min_thickness_mm
        );
    }

    #[test]
    fn thick_slab_is_clean() {
        let slab = box_mesh(10.0, 10.0, 5.0);
        let report = analyze(&slab, &ThicknessParams::default());
        assert!(!report.has_thin_regions());
    }

    #[test]
    fn same_seed_is_reproducible() {
        let slab = box_mesh(10.0, 10.0, 0.3);
        let params = ThicknessParams::default().seed(99);
        let a = analyze(&slab, &params);
        let b = analyze(&slab, &params);

        assert_eq!(a.samples_hit, b.samples_hit);
        assert_eq!(a.thin_sample_count, b.thin_sample_count);
        assert_eq!(a.region_count, b.region_count);
        assert!((a.min_thickness_mm - b.min_thickness_mm).abs() < f64::EPSILON);
    }

    #[test]
    fn unit_conversion_applies() {
        // The same slab declared in centimeters: 0.3 cm = 3 mm walls,
        // comfortably above a 0.6 mm threshold.
        let cube = unit_cube();
        let vertices = cube
            .vertices()
            .iter()
            .map(|v| Point3::new(v.x * 10.0, v.y * 10.0, v.z * 0.3))
            .collect();
        let slab_cm = TriMesh::from_buffers(
            vertices,
            cube.faces().to_vec(),
            Unit::Centimeters,
            &MeshLimits::default(),
        )
        .unwrap();

        let report = analyze(&slab_cm, &ThicknessParams::default());
        assert!(!report.has_thin_regions());
        assert!(report.min_thickness_mm >= 2.9);
    }

    #[test]
    fn region_cap_truncates() {
        let slab = box_mesh(10.0, 10.0, 0.3);
        let params = ThicknessParams::default().max_regions(0);
        let report = analyze(&slab, &params);

        assert!(report.thin_sample_count > 0);
        assert!(report.truncated);
        assert!(report.region_centers.is_empty());
    }
}
