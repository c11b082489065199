//! Deterministic area-weighted surface sampling.

use meshguard_types::{Point3, Triangle, Vector3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A point sampled on the mesh surface.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceSample {
    /// Position on the surface.
    pub position: Point3<f64>,
    /// Outward unit normal of the source triangle.
    pub normal: Vector3<f64>,
    /// Index of the triangle the sample lies on.
    pub face: usize,
}

/// Draw `count` samples distributed over the surface, weighted by area.
///
/// Faces are chosen by binary search over the cumulative area table, and
/// positions within a face use the square-root barycentric trick so the
/// distribution is uniform per unit area. Degenerate faces carry no area
/// and are never selected.
///
/// The RNG is a seeded `Pcg32`: the same mesh, `count` and `seed` always
/// produce the same samples, which makes whole reports reproducible.
#[must_use]
pub fn sample_surface(triangles: &[Triangle], count: usize, seed: u64) -> Vec<SurfaceSample> {
    let mut cumulative = Vec::with_capacity(triangles.len());
    let mut normals = Vec::with_capacity(triangles.len());
    let mut total = 0.0;
    for tri in triangles {
        // Degenerate triangles keep a zero-width slot so indices align.
        match tri.normal() {
            Some(n) => {
                total += tri.area();
                normals.push(Some(n));
            }
            None => normals.push(None),
        }
        cumulative.push(total);
    }

    if total <= 0.0 || count == 0 {
        return Vec::new();
    }

    let mut rng = Pcg32::seed_from_u64(seed);
    let mut samples = Vec::with_capacity(count);

    for _ in 0..count {
        let target = rng.gen::<f64>() * total;
        let face = match cumulative.binary_search_by(|probe| {
            probe
                .partial_cmp(&target)
                .unwrap_or(std::cmp::Ordering::Equal)
        }) {
            Ok(idx) | Err(idx) => idx.min(triangles.len() - 1),
        };
        let Some(normal) = normals[face] else {
            continue;
        };

        let tri = &triangles[face];
        let r1: f64 = rng.gen();
        let r2: f64 = rng.gen();
        let sqrt_r1 = r1.sqrt();
        let u = 1.0 - sqrt_r1;
        let v = sqrt_r1 * (1.0 - r2);
        let w = sqrt_r1 * r2;

        let position = Point3::new(
            u * tri.a.x + v * tri.b.x + w * tri.c.x,
            u * tri.a.y + v * tri.b.y + w * tri.c.y,
            u * tri.a.z + v * tri.b.z + w * tri.c.z,
        );

        samples.push(SurfaceSample {
            position,
            normal,
            face,
        });
    }

    samples
}
