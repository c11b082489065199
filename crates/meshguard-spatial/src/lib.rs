//! Spatial acceleration structures for the MeshGuard analyzers.
//!
//! Two structures cover every spatial query the pipeline needs:
//!
//! - [`Bvh`] - a bounding-volume hierarchy over triangles, answering
//!   box-overlap candidate queries (self-intersection) and nearest-hit ray
//!   queries (wall thickness)
//! - [`PointGrid`] - a uniform bucket grid over points, answering radius
//!   grouping queries (duplicate vertices, thin-sample clustering)
//!
//! Both are built per validation run, queried read-only, and dropped with
//! the run. Neither holds a reference to the mesh; callers pass triangle
//! and point slices explicitly.
//!
//! # Example
//!
//! ```
//! use meshguard_spatial::{Bvh, PointGrid};
//! use meshguard_types::{unit_cube, Point3, Vector3};
//!
//! let cube = unit_cube();
//! let triangles: Vec<_> = cube.triangles().collect();
//!
//! let bvh = Bvh::build(&triangles, 1e-9).unwrap();
//! let hit = bvh.cast_ray(
//!     &Point3::new(0.5, 0.5, -1.0),
//!     &Vector3::new(0.0, 0.0, 1.0),
//!     &triangles,
//!     f64::MAX,
//!     1e-10,
//!     &|_| false,
//! );
//! assert!(hit.is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bvh;
mod grid;
mod raycast;

pub use bvh::Bvh;
pub use grid::PointGrid;
pub use raycast::{direction_inverse, ray_aabb, ray_triangle, RayHit};
