//! Self-intersection detection for the MeshGuard validation engine.
//!
//! A mesh that crosses through itself cannot be sliced reliably, so
//! intersecting triangle pairs block printing. Detection runs in two
//! phases:
//!
//! 1. The shared [`Bvh`](meshguard_spatial::Bvh) proposes pairs whose
//!    bounding boxes overlap.
//! 2. Each candidate pair (excluding index-adjacent ones) goes through an
//!    exact interval-based triangle-triangle test.
//!
//! Contact points are retained as bounded evidence for the report.
//!
//! # Example
//!
//! ```
//! use meshguard_geometry::{find_self_intersections, IntersectionParams};
//! use meshguard_spatial::Bvh;
//! use meshguard_types::unit_cube;
//!
//! let cube = unit_cube();
//! let triangles: Vec<_> = cube.triangles().collect();
//! let bvh = Bvh::build(&triangles, 1e-9).unwrap();
//! let report = find_self_intersections(
//!     cube.faces(),
//!     &triangles,
//!     &bvh,
//!     &IntersectionParams::default(),
//! );
//! assert_eq!(report.pair_count, 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod analysis;
mod tritri;

pub use analysis::{find_self_intersections, IntersectionParams, IntersectionReport};
pub use tritri::triangles_intersect;
