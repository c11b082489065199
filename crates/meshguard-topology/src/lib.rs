//! Topological analysis for the MeshGuard validation engine.
//!
//! Answers the cheap, structural questions about a mesh before any
//! geometric analyzer runs:
//!
//! - **Watertightness** - are there boundary edges (holes)?
//! - **Manifoldness** - edges with three or more triangles, or vertices
//!   where two surface sheets meet in more than one fan
//! - **Duplicate vertices** - distinct vertices closer than an epsilon
//! - **Degenerate triangles** - area below a fraction of the mesh mean
//! - **Connected components** - islands of edge-connected triangles
//!
//! Everything is derived from a single [`EdgeAdjacency`] pass and returned
//! as a plain [`TopologyReport`]; mapping counts to issues and severities
//! is the pipeline's job.
//!
//! # Example
//!
//! ```
//! use meshguard_topology::{analyze_topology, TopologyParams};
//! use meshguard_types::unit_cube;
//!
//! let report = analyze_topology(&unit_cube(), &TopologyParams::default());
//! assert_eq!(report.boundary_edge_count, 0);
//! assert_eq!(report.component_count, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod adjacency;
mod analysis;
mod components;

pub use adjacency::EdgeAdjacency;
pub use analysis::{analyze_topology, TopologyParams, TopologyReport};
pub use components::{triangle_component_count, UnionFind};
