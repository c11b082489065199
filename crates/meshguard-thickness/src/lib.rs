//! Wall thickness estimation for the MeshGuard validation engine.
//!
//! Thin walls fail structurally or vanish entirely when printed, so the
//! pipeline samples the surface and measures how much material sits under
//! each point:
//!
//! 1. [`sample_surface`] draws seeded, area-weighted points on the surface.
//! 2. From each point, a ray cast along the inward normal through the
//!    shared BVH measures the distance to the opposite surface.
//! 3. Samples under the millimeter threshold are clustered into regions.
//!
//! All reported distances are in millimeters; the mesh's declared unit is
//! converted internally. Analysis is only meaningful on watertight meshes;
//! the pipeline skips it otherwise.
//!
//! # Example
//!
//! ```
//! use meshguard_spatial::Bvh;
//! use meshguard_thickness::{analyze_thickness, ThicknessParams};
//! use meshguard_types::unit_cube;
//!
//! let cube = unit_cube();
//! let triangles: Vec<_> = cube.triangles().collect();
//! let bvh = Bvh::build(&triangles, 1e-9).unwrap();
//!
//! let report = analyze_thickness(&cube, &triangles, &bvh, &ThicknessParams::default());
//! assert!(report.samples_hit > 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod analysis;
mod params;
mod result;
mod sampling;

pub use analysis::analyze_thickness;
pub use params::ThicknessParams;
pub use result::ThicknessReport;
pub use sampling::{sample_surface, SurfaceSample};
