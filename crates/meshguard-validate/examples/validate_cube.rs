//! Validate a couple of built-in meshes and print their reports.
//!
//! Run with: cargo run -p meshguard-validate --example validate_cube

use meshguard_types::{unit_cube, Unit};
use meshguard_validate::{MemoryReportStore, ReportStore, Validator, ValidatorConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let validator = Validator::new(ValidatorConfig::default());
    let store = MemoryReportStore::new();

    // A clean cube...
    let cube = unit_cube();
    let report = validator
        .validate(
            cube.vertices().to_vec(),
            cube.faces().to_vec(),
            Unit::Millimeters,
            "cube.stl",
        )
        .expect("cube buffers are valid");
    println!("{report}");

    // ...and the same cube with a missing triangle.
    let mut faces = cube.faces().to_vec();
    faces.pop();
    let report = validator
        .validate(
            cube.vertices().to_vec(),
            faces,
            Unit::Millimeters,
            "holed-cube.stl",
        )
        .expect("cube buffers are valid");
    println!("{report}");

    let id = report.model_id.clone();
    store.put(report);
    if let Some(stored) = store.get(&id) {
        println!(
            "stored report {} -> {}",
            id,
            stored.to_json().expect("report serializes")
        );
    }
}
