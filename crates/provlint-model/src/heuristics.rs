use crate::record::ValidationError;
use serde::{Deserialize, Serialize};

/// Candidate locations and acceptance settings for the extraction
/// heuristics. Passed explicitly into every extractor call; there is no
/// module-level configuration. `Heuristics::default()` reproduces the
/// built-in conventions, and a partial JSON document deserializes on top
/// of the defaults, so the recognized prefix set is extensible without
/// code changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
#[non_exhaustive]
pub struct Heuristics {
    /// Case-folded prefixes a job identifier must start with.
    pub job_id_prefixes: Vec<String>,
    /// Direct keys holding a single job identifier string.
    pub job_id_keys: Vec<String>,
    /// Direct keys holding a list of job identifier strings.
    pub job_id_list_keys: Vec<String>,
    /// Nested key paths holding a single job identifier string.
    pub job_id_paths: Vec<Vec<String>>,
    pub backend_paths: Vec<Vec<String>>,
    /// Naming-convention prefix for the backend leaf-scan fallback.
    pub backend_prefix: String,
    pub shots_paths: Vec<Vec<String>>,
    /// Top-level keys whose list items are searched for a per-run shot count.
    pub run_list_keys: Vec<String>,
    pub timestamp_keys: Vec<String>,
    pub timestamp_paths: Vec<Vec<String>>,
    /// Key declaring an explicit grouping identifier.
    pub group_key: String,
    /// Marker word identifying narrative dashboard documents.
    pub narrative_marker: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn paths(items: &[&[&str]]) -> Vec<Vec<String>> {
    items.iter().map(|p| strings(p)).collect()
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            job_id_prefixes: strings(&["d0", "c0"]),
            job_id_keys: strings(&["job_id", "jobId", "runtime_job_id"]),
            job_id_list_keys: strings(&["job_ids", "jobIds", "jobs", "ibm_job_ids"]),
            job_id_paths: paths(&[
                &["execution_metadata", "job_id"],
                &["execution_metadata", "jobId"],
                &["proof", "execution_metadata", "job_id"],
                &["proof", "execution_metadata", "jobId"],
                &["ibm", "job_id"],
                &["ibm", "jobId"],
            ]),
            backend_paths: paths(&[
                &["backend"],
                &["hardware", "backend"],
                &["execution_metadata", "backend"],
                &["proof", "execution_metadata", "backend"],
                &["ibm", "backend"],
                &["summary", "backend"],
            ]),
            backend_prefix: "ibm_".to_string(),
            shots_paths: paths(&[
                &["shots"],
                &["summary", "shots"],
                &["execution_metadata", "shots"],
                &["proof", "execution_metadata", "shots"],
                &["ibm", "shots"],
            ]),
            run_list_keys: strings(&["runs", "results", "jobs", "executions"]),
            timestamp_keys: strings(&["timestamp", "created_utc", "created", "time", "date"]),
            timestamp_paths: paths(&[
                &["summary", "timestamp"],
                &["metadata", "timestamp"],
                &["execution_metadata", "timestamp"],
            ]),
            group_key: "evidence_group_id".to_string(),
            narrative_marker: "dashboard".to_string(),
        }
    }
}

impl Heuristics {
    /// Prefixes case-folded once, for the shared acceptance filter.
    #[must_use]
    pub fn folded_prefixes(&self) -> Vec<String> {
        self.job_id_prefixes
            .iter()
            .map(|p| p.trim().to_lowercase())
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.job_id_prefixes.is_empty() {
            return Err(ValidationError(
                "heuristics job_id_prefixes must not be empty".to_string(),
            ));
        }
        for prefix in &self.job_id_prefixes {
            let trimmed = prefix.trim();
            if trimmed.is_empty() {
                return Err(ValidationError(
                    "heuristics job_id_prefixes must not contain empty entries".to_string(),
                ));
            }
            if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ValidationError(format!(
                    "heuristics job_id_prefix must be alphanumeric: `{trimmed}`"
                )));
            }
        }
        if self.group_key.trim().is_empty() {
            return Err(ValidationError(
                "heuristics group_key must not be empty".to_string(),
            ));
        }
        if self.narrative_marker.trim().is_empty() {
            return Err(ValidationError(
                "heuristics narrative_marker must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
