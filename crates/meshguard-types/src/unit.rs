//! Model units.

/// Unit of the mesh's vertex coordinates.
///
/// Reports are always expressed in millimeters; analyzers convert measured
/// distances with [`Unit::to_mm`] before comparing against mm thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    /// Millimeters (the default for print workflows).
    #[default]
    Millimeters,
    /// Centimeters.
    Centimeters,
    /// Meters.
    Meters,
    /// Inches.
    Inches,
}

impl Unit {
    /// Scale factor from this unit to millimeters.
    #[must_use]
    pub const fn to_mm(self) -> f64 {
        match self {
            Self::Millimeters => 1.0,
            Self::Centimeters => 10.0,
            Self::Meters => 1000.0,
            Self::Inches => 25.4,
        }
    }

    /// Short unit label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Millimeters => "mm",
            Self::Centimeters => "cm",
            Self::Meters => "m",
            Self::Inches => "in",
        }
    }
}
