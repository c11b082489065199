//! Core mesh model for the MeshGuard validation engine.
//!
//! This crate provides the types every analyzer consumes:
//!
//! - [`TriMesh`] - a validated, immutable indexed triangle mesh
//! - [`Triangle`] - a triangle resolved to vertex positions
//! - [`Aabb`] - axis-aligned bounding box
//! - [`MeshLimits`] / [`InvalidMeshError`] - construction-time guards
//! - [`Unit`] - declared unit of the model's coordinates
//!
//! # Invariants
//!
//! A `TriMesh` that exists is structurally sound: non-empty buffers, every
//! triangle index in range, counts within the configured limits. Analyzers
//! rely on this and never re-check indices.
//!
//! # Coordinate System
//!
//! Right-handed, Z up. Face winding is counter-clockwise when viewed from
//! outside; normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use meshguard_types::{unit_cube, MeshLimits, TriMesh, Point3, Unit};
//!
//! let cube = unit_cube();
//! assert_eq!(cube.triangle_count(), 12);
//!
//! // Out-of-range indices are rejected at construction.
//! let bad = TriMesh::from_buffers(
//!     vec![Point3::new(0.0, 0.0, 0.0)],
//!     vec![[0, 1, 2]],
//!     Unit::Millimeters,
//!     &MeshLimits::default(),
//! );
//! assert!(bad.is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod error;
mod mesh;
mod triangle;
mod unit;

pub use bounds::Aabb;
pub use error::{InvalidMeshError, MeshResult};
pub use mesh::{unit_cube, MeshLimits, TriMesh};
pub use triangle::Triangle;
pub use unit::Unit;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
