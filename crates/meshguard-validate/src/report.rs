//! The validation report and the decision function.

use serde::{Deserialize, Serialize};

use crate::issues::Issue;
use crate::metrics::Metrics;

/// Tri-state printability verdict.
///
/// A pure function of issue severities: any error blocks, any warning
/// allows with warnings, otherwise allow. Issue order never matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// At least one error: do not print.
    Block,
    /// Warnings only: print at the caller's discretion.
    AllowWithWarnings,
    /// Clean: print.
    Allow,
}

impl Decision {
    /// Derive the decision from a set of issues.
    #[must_use]
    pub fn from_issues(issues: &[Issue]) -> Self {
        if issues.iter().any(Issue::is_error) {
            Self::Block
        } else if issues.iter().any(Issue::is_warning) {
            Self::AllowWithWarnings
        } else {
            Self::Allow
        }
    }

    /// The serialized name of this decision.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Block => "BLOCK",
            Self::AllowWithWarnings => "ALLOW_WITH_WARNINGS",
            Self::Allow => "ALLOW",
        }
    }
}

/// Immutable result of one validation run.
///
/// The serialized field names and shapes are a compatibility contract with
/// the hosting service. Reports are created once, stored externally keyed
/// by `model_id`, and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Identifying token for this validation run.
    pub model_id: String,
    /// Original filename of the uploaded model.
    pub filename: String,
    /// Mesh metrics, present regardless of issues.
    pub metrics: Metrics,
    /// Issues with error severity, in detection order.
    pub errors: Vec<Issue>,
    /// Issues with warning severity, in detection order.
    pub warnings: Vec<Issue>,
    /// Final verdict.
    pub decision: Decision,
    /// Wall-clock duration of the whole pipeline in milliseconds.
    pub processing_time_ms: f64,
    /// RFC 3339 timestamp of report creation (UTC).
    pub timestamp: String,
    /// Explanatory notes for stages that were skipped by policy (not by
    /// timeout); empty for most reports and omitted from JSON when empty.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
}

impl Report {
    /// Total number of issues across both severities.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Whether the decision is [`Decision::Block`].
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.decision == Decision::Block
    }

    /// Serialize to the contract JSON shape.
    ///
    /// # Errors
    ///
    /// Returns any `serde_json` serialization error.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Report {} ({})", self.model_id, self.filename)?;
        writeln!(
            f,
            "  {} triangles, {} vertices, {} component(s)",
            self.metrics.triangles, self.metrics.vertices, self.metrics.components
        )?;
        writeln!(
            f,
            "  Decision: {} ({} error(s), {} warning(s))",
            self.decision.as_str(),
            self.errors.len(),
            self.warnings.len()
        )?;
        for issue in self.errors.iter().chain(self.warnings.iter()) {
            writeln!(
                f,
                "    [{}] {}: {}",
                issue.severity.as_str(),
                issue.code.as_str(),
                issue.message
            )?;
        }
        for note in &self.notes {
            writeln!(f, "    note: {note}")?;
        }
        Ok(())
    }
}
