use serde::{Deserialize, Serialize};

/// Derived, non-persistent consistency findings over one manifest.
///
/// The mismatch list holds job identifiers referenced by narrative
/// documents but recorded by no structured record; the four missing-field
/// lists hold file paths of structured records lacking that field. A
/// single record can appear in all four lists. Purely informational:
/// findings never fail a run and are never embedded in the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct ConsistencyReport {
    pub unmatched_dashboard_job_ids: Vec<String>,
    pub missing_backend: Vec<String>,
    pub missing_shots: Vec<String>,
    pub missing_timestamp: Vec<String>,
    pub missing_job_ids: Vec<String>,
}

impl ConsistencyReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unmatched_dashboard_job_ids.is_empty()
            && self.missing_backend.is_empty()
            && self.missing_shots.is_empty()
            && self.missing_timestamp.is_empty()
            && self.missing_job_ids.is_empty()
    }

    #[must_use]
    pub fn finding_count(&self) -> usize {
        self.unmatched_dashboard_job_ids.len()
            + self.missing_backend.len()
            + self.missing_shots.len()
            + self.missing_timestamp.len()
            + self.missing_job_ids.len()
    }
}
