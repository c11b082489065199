//! Pipeline benchmark over a synthetic sphere mesh.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use meshguard_types::{Point3, Unit};
use meshguard_validate::{Validator, ValidatorConfig};

/// Build a UV-sphere triangulation with the given resolution.
fn sphere_buffers(stacks: u32, slices: u32) -> (Vec<Point3<f64>>, Vec<[u32; 3]>) {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();

    // Poles plus a grid of latitude rings.
    vertices.push(Point3::new(0.0, 0.0, 1.0));
    for i in 1..stacks {
        let phi = std::f64::consts::PI * f64::from(i) / f64::from(stacks);
        for j in 0..slices {
            let theta = 2.0 * std::f64::consts::PI * f64::from(j) / f64::from(slices);
            vertices.push(Point3::new(
                phi.sin() * theta.cos(),
                phi.sin() * theta.sin(),
                phi.cos(),
            ));
        }
    }
    vertices.push(Point3::new(0.0, 0.0, -1.0));
    let south = (vertices.len() - 1) as u32;

    let ring = |i: u32, j: u32| 1 + (i - 1) * slices + (j % slices);

    // Top cap
    for j in 0..slices {
        faces.push([0, ring(1, j), ring(1, j + 1)]);
    }
    // Body
    for i in 1..stacks - 1 {
        for j in 0..slices {
            let (a, b) = (ring(i, j), ring(i, j + 1));
            let (c, d) = (ring(i + 1, j), ring(i + 1, j + 1));
            faces.push([a, c, d]);
            faces.push([a, d, b]);
        }
    }
    // Bottom cap
    for j in 0..slices {
        faces.push([south, ring(stacks - 1, j + 1), ring(stacks - 1, j)]);
    }

    (vertices, faces)
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");

    for (stacks, slices) in [(16u32, 32u32), (32, 64)] {
        let (vertices, faces) = sphere_buffers(stacks, slices);
        let validator = Validator::new(ValidatorConfig::default().thickness_sample_count(1024));
        let label = format!("sphere_{}t", faces.len());

        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &(vertices, faces),
            |b, (vertices, faces)| {
                b.iter(|| {
                    validator
                        .validate(
                            vertices.clone(),
                            faces.clone(),
                            Unit::Millimeters,
                            "sphere.stl",
                        )
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
