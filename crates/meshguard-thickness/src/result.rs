//! Result types for thickness analysis.

use meshguard_types::Point3;

/// Result of one wall thickness analysis pass.
///
/// Distances are reported in millimeters regardless of the mesh's declared
/// unit.
#[derive(Debug, Clone)]
pub struct ThicknessReport {
    /// Number of samples requested.
    pub samples_requested: usize,
    /// Number of samples actually cast (degenerate faces yield none).
    pub samples_cast: usize,
    /// Number of samples whose inward ray hit the opposite surface.
    pub samples_hit: usize,

    /// Minimum thickness observed across all hits, in millimeters.
    /// `f64::INFINITY` when no ray hit anything.
    pub min_thickness_mm: f64,

    /// Number of samples measuring below the threshold.
    pub thin_sample_count: usize,
    /// Number of spatial clusters the thin samples form.
    pub region_count: usize,
    /// Representative center per thin region, capped at `max_regions`.
    pub region_centers: Vec<Point3<f64>>,
    /// Whether the region list was capped.
    pub truncated: bool,
}

impl ThicknessReport {
    /// An empty report for meshes that produced no samples.
    #[must_use]
    pub fn empty(samples_requested: usize) -> Self {
        Self {
            samples_requested,
            samples_cast: 0,
            samples_hit: 0,
            min_thickness_mm: f64::INFINITY,
            thin_sample_count: 0,
            region_count: 0,
            region_centers: Vec::new(),
            truncated: false,
        }
    }

    /// Whether any thin region was found.
    #[must_use]
    pub fn has_thin_regions(&self) -> bool {
        self.region_count > 0
    }
}

impl std::fmt::Display for ThicknessReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Wall thickness:")?;
        writeln!(
            f,
            "  Samples: {} cast / {} requested, {} hits",
            self.samples_cast, self.samples_requested, self.samples_hit
        )?;
        if self.min_thickness_mm.is_finite() {
            writeln!(f, "  Min thickness: {:.3} mm", self.min_thickness_mm)?;
        } else {
            writeln!(f, "  Min thickness: n/a")?;
        }
        writeln!(
            f,
            "  Thin regions: {} ({} samples)",
            self.region_count, self.thin_sample_count
        )?;
        if self.truncated {
            writeln!(f, "  (region list truncated)")?;
        }
        Ok(())
    }
}
