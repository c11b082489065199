//! Per-run validator configuration.

use meshguard_geometry::IntersectionParams;
use meshguard_thickness::ThicknessParams;
use meshguard_topology::TopologyParams;
use meshguard_types::MeshLimits;
use serde::{Deserialize, Serialize};

/// Configuration for one validation run.
///
/// All fields have working defaults, so a partial JSON object (or none at
/// all) from the hosting service deserializes into a usable configuration.
/// The numeric defaults are starting points, not calibrated manufacturing
/// tolerances.
///
/// # Example
///
/// ```
/// use meshguard_validate::ValidatorConfig;
///
/// let config = ValidatorConfig::default()
///     .thin_wall_threshold_mm(0.8)
///     .timeout_ms(2_000);
/// assert!((config.thin_wall_threshold_mm - 0.8).abs() < 1e-12);
///
/// // Partial JSON fills the rest with defaults.
/// let from_json: ValidatorConfig =
///     serde_json::from_str(r#"{"max_triangles": 50000}"#).unwrap();
/// assert_eq!(from_json.max_triangles, 50_000);
/// assert_eq!(from_json.thickness_sample_count, 4096);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Hard limit on triangle count, enforced before any analysis.
    pub max_triangles: usize,
    /// Hard limit on vertex count, enforced before any analysis.
    pub max_vertices: usize,

    /// Duplicate-vertex distance; `None` derives 1e-6 times the bounding
    /// box diagonal.
    pub duplicate_vertex_epsilon: Option<f64>,
    /// Degenerate-face threshold as a fraction of mean triangle area.
    pub degenerate_area_factor: f64,

    /// Minimum wall thickness in millimeters.
    pub thin_wall_threshold_mm: f64,
    /// Number of surface samples for thickness estimation.
    pub thickness_sample_count: usize,
    /// Seed for the thickness sampling RNG.
    pub sample_seed: u64,

    /// Cap on retained self-intersection contact points.
    pub max_intersection_samples: usize,

    /// Pipeline deadline in milliseconds. Zero disables the timeout.
    pub timeout_ms: u64,

    /// Report more than one connected component as a warning instead of a
    /// metric-only fact.
    pub downgrade_multi_component_to_warning: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_triangles: 2_000_000,
            max_vertices: 2_000_000,
            duplicate_vertex_epsilon: None,
            degenerate_area_factor: 1e-6,
            thin_wall_threshold_mm: 0.6,
            thickness_sample_count: 4096,
            sample_seed: 0,
            max_intersection_samples: 100,
            timeout_ms: 5_000,
            downgrade_multi_component_to_warning: true,
        }
    }
}

impl ValidatorConfig {
    /// Set the triangle limit.
    #[must_use]
    pub const fn max_triangles(mut self, max: usize) -> Self {
        self.max_triangles = max;
        self
    }

    /// Set the vertex limit.
    #[must_use]
    pub const fn max_vertices(mut self, max: usize) -> Self {
        self.max_vertices = max;
        self
    }

    /// Set an explicit duplicate-vertex epsilon.
    #[must_use]
    pub const fn duplicate_vertex_epsilon(mut self, epsilon: f64) -> Self {
        self.duplicate_vertex_epsilon = Some(epsilon);
        self
    }

    /// Set the thin-wall threshold in millimeters.
    #[must_use]
    pub const fn thin_wall_threshold_mm(mut self, mm: f64) -> Self {
        self.thin_wall_threshold_mm = mm;
        self
    }

    /// Set the thickness sample count.
    #[must_use]
    pub const fn thickness_sample_count(mut self, count: usize) -> Self {
        self.thickness_sample_count = count;
        self
    }

    /// Set the sampling seed.
    #[must_use]
    pub const fn sample_seed(mut self, seed: u64) -> Self {
        self.sample_seed = seed;
        self
    }

    /// Set the pipeline deadline in milliseconds (zero disables).
    #[must_use]
    pub const fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = ms;
        self
    }

    /// Choose whether multiple components produce a warning.
    #[must_use]
    pub const fn downgrade_multi_component_to_warning(mut self, downgrade: bool) -> Self {
        self.downgrade_multi_component_to_warning = downgrade;
        self
    }

    /// Mesh construction limits derived from this configuration.
    #[must_use]
    pub const fn mesh_limits(&self) -> MeshLimits {
        MeshLimits::new(self.max_vertices, self.max_triangles)
    }

    /// Topology analyzer parameters derived from this configuration.
    #[must_use]
    pub fn topology_params(&self) -> TopologyParams {
        TopologyParams {
            duplicate_epsilon: self.duplicate_vertex_epsilon,
            degenerate_area_factor: self.degenerate_area_factor,
        }
    }

    /// Self-intersection parameters derived from this configuration.
    #[must_use]
    pub fn intersection_params(&self) -> IntersectionParams {
        IntersectionParams {
            max_samples: self.max_intersection_samples,
            ..IntersectionParams::default()
        }
    }

    /// Thickness analyzer parameters derived from this configuration.
    #[must_use]
    pub fn thickness_params(&self) -> ThicknessParams {
        ThicknessParams::default()
            .min_thickness_mm(self.thin_wall_threshold_mm)
            .sample_count(self.thickness_sample_count)
            .seed(self.sample_seed)
    }
}
