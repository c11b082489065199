//! Property-based tests for the validation pipeline.
//!
//! Random (frequently broken) meshes exercise the guarantee that the
//! pipeline classifies input instead of crashing on it, and that it is
//! deterministic for a fixed configuration.

use meshguard_types::{Point3, Unit};
use meshguard_validate::{Decision, IssueCode, Validator, ValidatorConfig};
use proptest::prelude::*;

/// Random vertex positions in a bounded range.
fn arb_vertices(max: usize) -> impl Strategy<Value = Vec<Point3<f64>>> {
    prop::collection::vec(
        prop::array::uniform3(-50.0..50.0f64).prop_map(|[x, y, z]| Point3::new(x, y, z)),
        1..=max,
    )
}

/// Random faces with indices valid for `vertex_count` vertices.
fn arb_faces(vertex_count: u32, max: usize) -> impl Strategy<Value = Vec<[u32; 3]>> {
    prop::collection::vec(prop::array::uniform3(0..vertex_count), 1..=max)
}

/// A structurally valid (but usually topologically broken) mesh.
fn arb_mesh() -> impl Strategy<Value = (Vec<Point3<f64>>, Vec<[u32; 3]>)> {
    arb_vertices(24).prop_flat_map(|vertices| {
        let n = vertices.len() as u32;
        arb_faces(n, 48).prop_map(move |faces| (vertices.clone(), faces))
    })
}

/// A small sample count keeps the random-mesh runs fast.
fn fast_config() -> ValidatorConfig {
    ValidatorConfig::default().thickness_sample_count(64)
}

proptest! {
    /// Validation never panics, whatever the triangle soup looks like.
    #[test]
    fn validation_never_panics((vertices, faces) in arb_mesh()) {
        let validator = Validator::new(fast_config());
        let _ = validator.validate(vertices, faces, Unit::Millimeters, "random.stl");
    }

    /// Same input, same configuration: same issue codes, counts and
    /// decision.
    #[test]
    fn validation_is_deterministic((vertices, faces) in arb_mesh()) {
        let validator = Validator::new(fast_config());
        let a = validator.validate(vertices.clone(), faces.clone(), Unit::Millimeters, "r.stl");
        let b = validator.validate(vertices, faces, Unit::Millimeters, "r.stl");

        match (a, b) {
            (Ok(ra), Ok(rb)) => {
                prop_assert_eq!(ra.decision, rb.decision);
                let codes_a: Vec<_> = ra.errors.iter().chain(ra.warnings.iter())
                    .map(|i| (i.code, i.count)).collect();
                let codes_b: Vec<_> = rb.errors.iter().chain(rb.warnings.iter())
                    .map(|i| (i.code, i.count)).collect();
                prop_assert_eq!(codes_a, codes_b);
                prop_assert_eq!(ra.metrics.components, rb.metrics.components);
            }
            (Err(ea), Err(eb)) => prop_assert_eq!(ea, eb),
            (a, b) => prop_assert!(false, "mismatched outcomes: {a:?} vs {b:?}"),
        }
    }

    /// A mesh with any boundary edge is blocked as not watertight.
    #[test]
    fn open_meshes_are_blocked((vertices, faces) in arb_mesh()) {
        let validator = Validator::new(fast_config());
        if let Ok(report) = validator.validate(vertices, faces, Unit::Millimeters, "r.stl") {
            let not_watertight = report
                .errors
                .iter()
                .any(|i| i.code == IssueCode::NotWatertight);
            if not_watertight {
                prop_assert_eq!(report.decision, Decision::Block);
            }
        }
    }

    /// The severity split is exact: errors hold only errors, warnings only
    /// warnings, and the decision matches the split.
    #[test]
    fn severity_partition_is_consistent((vertices, faces) in arb_mesh()) {
        let validator = Validator::new(fast_config());
        if let Ok(report) = validator.validate(vertices, faces, Unit::Millimeters, "r.stl") {
            prop_assert!(report.errors.iter().all(meshguard_validate::Issue::is_error));
            prop_assert!(report.warnings.iter().all(meshguard_validate::Issue::is_warning));

            let expected = if !report.errors.is_empty() {
                Decision::Block
            } else if !report.warnings.is_empty() {
                Decision::AllowWithWarnings
            } else {
                Decision::Allow
            };
            prop_assert_eq!(report.decision, expected);
        }
    }
}
