//! Issue codes, severities and the issue type itself.

use meshguard_types::InvalidMeshError;
use serde::{Deserialize, Serialize};

/// The closed set of issue codes a report can carry.
///
/// Serialized names are a compatibility contract with the hosting service;
/// adding a variant is an API change for every consumer of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    /// Mesh has boundary edges (holes).
    NotWatertight,
    /// Mesh has non-manifold edges or vertices.
    NonManifold,
    /// Distinct vertices closer together than the epsilon.
    DuplicateVertices,
    /// Triangles with (near-)zero area.
    DegenerateFace,
    /// More than one connected component.
    MultipleComponents,
    /// Triangle pairs that properly intersect.
    SelfIntersection,
    /// Wall regions thinner than the threshold.
    ThinWall,
    /// An analyzer stage did not run to completion.
    TimedOut,
    /// The input mesh failed structural validation.
    InvalidMesh,
}

impl IssueCode {
    /// The serialized name of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotWatertight => "NOT_WATERTIGHT",
            Self::NonManifold => "NON_MANIFOLD",
            Self::DuplicateVertices => "DUPLICATE_VERTICES",
            Self::DegenerateFace => "DEGENERATE_FACE",
            Self::MultipleComponents => "MULTIPLE_COMPONENTS",
            Self::SelfIntersection => "SELF_INTERSECTION",
            Self::ThinWall => "THIN_WALL",
            Self::TimedOut => "TIMED_OUT",
            Self::InvalidMesh => "INVALID_MESH",
        }
    }
}

/// Issue severity. Any error blocks printing; warnings allow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// May print, with reduced quality or cosmetic defects.
    Warning,
    /// Will fail to print or slice incorrectly.
    Error,
}

impl Severity {
    /// The serialized name of this severity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// One detected problem, immutable once created.
///
/// `count` and `locations` carry optional numeric evidence (how many
/// boundary edges, where the intersections are) and are omitted from the
/// serialized form when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// What kind of problem this is.
    pub code: IssueCode,
    /// Human-readable description.
    pub message: String,
    /// How bad it is.
    pub severity: Severity,
    /// Optional count evidence (boundary edges, duplicate groups, ...).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub count: Option<u64>,
    /// Optional location evidence in millimeters.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub locations: Option<Vec<[f64; 3]>>,
}

impl Issue {
    /// Create an error-severity issue.
    #[must_use]
    pub fn error(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            severity: Severity::Error,
            count: None,
            locations: None,
        }
    }

    /// Create a warning-severity issue.
    #[must_use]
    pub fn warning(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            severity: Severity::Warning,
            count: None,
            locations: None,
        }
    }

    /// Attach a count as evidence.
    #[must_use]
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    /// Attach locations (in millimeters) as evidence.
    #[must_use]
    pub fn with_locations(mut self, locations: Vec<[f64; 3]>) -> Self {
        self.locations = Some(locations);
        self
    }

    /// The issue shape of a structural failure, for hosts that serialize
    /// rejected requests in the same format as report issues.
    #[must_use]
    pub fn invalid_mesh(err: &InvalidMeshError) -> Self {
        Self::error(IssueCode::InvalidMesh, err.to_string())
    }

    /// Whether this issue is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Whether this issue is a warning.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_builders() {
        let issue = Issue::error(IssueCode::NotWatertight, "3 boundary edges").with_count(3);
        assert!(issue.is_error());
        assert_eq!(issue.count, Some(3));
        assert!(issue.locations.is_none());

        let issue = Issue::warning(IssueCode::ThinWall, "thin").with_locations(vec![[1.0, 2.0, 3.0]]);
        assert!(issue.is_warning());
        assert_eq!(issue.locations.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn code_serialization_contract() {
        let json = serde_json::to_string(&IssueCode::NotWatertight).unwrap();
        assert_eq!(json, "\"NOT_WATERTIGHT\"");
        let json = serde_json::to_string(&IssueCode::SelfIntersection).unwrap();
        assert_eq!(json, "\"SELF_INTERSECTION\"");
        let json = serde_json::to_string(&IssueCode::TimedOut).unwrap();
        assert_eq!(json, "\"TIMED_OUT\"");
    }

    #[test]
    fn severity_serialization_contract() {
        assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), "\"error\"");
        assert_eq!(
            serde_json::to_string(&Severity::Warning).unwrap(),
            "\"warning\""
        );
    }

    #[test]
    fn optional_evidence_is_omitted() {
        let issue = Issue::error(IssueCode::NonManifold, "bad edges");
        let json = serde_json::to_string(&issue).unwrap();
        assert!(!json.contains("count"));
        assert!(!json.contains("locations"));
    }

    #[test]
    fn invalid_mesh_issue_from_error() {
        let err = InvalidMeshError::NoTriangles;
        let issue = Issue::invalid_mesh(&err);
        assert_eq!(issue.code, IssueCode::InvalidMesh);
        assert!(issue.is_error());
        assert!(issue.message.contains("no triangles"));
    }

    #[test]
    fn code_as_str_matches_serde() {
        for code in [
            IssueCode::NotWatertight,
            IssueCode::NonManifold,
            IssueCode::DuplicateVertices,
            IssueCode::DegenerateFace,
            IssueCode::MultipleComponents,
            IssueCode::SelfIntersection,
            IssueCode::ThinWall,
            IssueCode::TimedOut,
            IssueCode::InvalidMesh,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }
}
