//! Validation pipeline and decision engine for MeshGuard.
//!
//! This crate ties the analyzers together into a go/no-go pipeline for
//! 3D-print uploads:
//!
//! 1. **Construction** - decoded buffers become a
//!    [`TriMesh`](meshguard_types::TriMesh); structural failures abort
//!    here with [`InvalidMeshError`](meshguard_types::InvalidMeshError).
//! 2. **Topology** - watertightness, manifoldness, duplicates,
//!    degenerates, components.
//! 3. **Self-intersection** - exact pair tests over BVH candidates.
//! 4. **Wall thickness** - seeded surface sampling (skipped with a note
//!    on open meshes).
//!
//! Detected defects never abort the pipeline; they accumulate as
//! [`Issue`]s and fold into a tri-state [`Decision`]. A configurable
//! deadline is checked between stages, and skipped stages surface as a
//! `TIMED_OUT` warning rather than silently missing results.
//!
//! The serialized [`Report`] shape is a compatibility contract with the
//! hosting service; storage is behind the injected [`ReportStore`] trait.
//!
//! # Example
//!
//! ```
//! use meshguard_types::{unit_cube, Unit};
//! use meshguard_validate::{Decision, MemoryReportStore, ReportStore, Validator};
//!
//! let validator = Validator::default();
//! let store = MemoryReportStore::new();
//!
//! let cube = unit_cube();
//! let report = validator
//!     .validate(
//!         cube.vertices().to_vec(),
//!         cube.faces().to_vec(),
//!         Unit::Millimeters,
//!         "cube.stl",
//!     )
//!     .unwrap();
//! assert_eq!(report.decision, Decision::Allow);
//!
//! let id = report.model_id.clone();
//! store.put(report);
//! assert!(store.get(&id).is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod config;
mod issues;
mod metrics;
mod pipeline;
mod report;
mod store;

pub use config::ValidatorConfig;
pub use issues::{Issue, IssueCode, Severity};
pub use metrics::Metrics;
pub use pipeline::Validator;
pub use report::{Decision, Report};
pub use store::{MemoryReportStore, ReportStore};
