//! Injected report storage interface.

use std::sync::RwLock;

use hashbrown::HashMap;

use crate::report::Report;

/// Where finished reports go.
///
/// The engine never retains reports itself; the hosting service injects a
/// store and owns retention and eviction. Implementations must tolerate
/// concurrent `put`/`get` from multiple validation workers.
pub trait ReportStore: Send + Sync {
    /// Store a report under its `model_id`, replacing any previous one.
    fn put(&self, report: Report);

    /// Fetch a report by id, or `None` if unknown (or already evicted).
    fn get(&self, model_id: &str) -> Option<Report>;
}

/// A process-local store backed by a map.
///
/// Suitable for tests and single-process deployments; anything that must
/// survive a restart belongs behind a real storage implementation.
#[derive(Debug, Default)]
pub struct MemoryReportStore {
    reports: RwLock<HashMap<String, Report>>,
}

impl MemoryReportStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reports
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReportStore for MemoryReportStore {
    fn put(&self, report: Report) {
        self.reports
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(report.model_id.clone(), report);
    }

    fn get(&self, model_id: &str) -> Option<Report> {
        self.reports
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(model_id)
            .cloned()
    }
}
