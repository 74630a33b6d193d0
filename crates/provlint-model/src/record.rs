use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

pub const STRUCTURED_EXTENSION: &str = "json";
pub const NARRATIVE_EXTENSION: &str = "md";

pub const SHA256_HEX_LEN: usize = 64;

#[must_use]
pub fn path_has_extension(path: &str, extension: &str) -> bool {
    match path.rsplit_once('.') {
        Some((_, ext)) => ext.eq_ignore_ascii_case(extension),
        None => false,
    }
}

#[must_use]
pub fn is_structured_path(path: &str) -> bool {
    path_has_extension(path, STRUCTURED_EXTENSION)
}

#[must_use]
pub fn is_narrative_path(path: &str) -> bool {
    path_has_extension(path, NARRATIVE_EXTENSION)
}

/// One evidence file's extracted summary.
///
/// `file`, `sha256`, `size_bytes`, `git_commit`, and `evidence_group_id`
/// are always present. The provenance fields are present only when the
/// extraction heuristics found evidence; an absent field is meaningful
/// (the consistency checker lints on it) and must never serialize as null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct EvidenceRecord {
    pub file: String,
    pub sha256: String,
    pub size_bytes: u64,
    pub git_commit: String,
    pub evidence_group_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shots: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub job_ids: Vec<String>,
}

impl EvidenceRecord {
    #[must_use]
    pub fn new(
        file: String,
        sha256: String,
        size_bytes: u64,
        git_commit: String,
        evidence_group_id: String,
    ) -> Self {
        Self {
            file,
            sha256,
            size_bytes,
            git_commit,
            evidence_group_id,
            backend: None,
            shots: None,
            timestamp: None,
            job_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_structured(&self) -> bool {
        is_structured_path(&self.file)
    }

    #[must_use]
    pub fn is_narrative(&self) -> bool {
        is_narrative_path(&self.file)
    }

    #[must_use]
    pub fn has_job_ids(&self) -> bool {
        !self.job_ids.is_empty()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.file.trim().is_empty() {
            return Err(ValidationError("record file path must not be empty".to_string()));
        }
        if self.sha256.len() != SHA256_HEX_LEN
            || !self.sha256.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(ValidationError(format!(
                "record sha256 must be {SHA256_HEX_LEN} hex chars: {}",
                self.file
            )));
        }
        if self.git_commit.trim().is_empty() {
            return Err(ValidationError(format!(
                "record git_commit must not be empty: {}",
                self.file
            )));
        }
        if self.evidence_group_id.trim().is_empty() {
            return Err(ValidationError(format!(
                "record evidence_group_id must not be empty: {}",
                self.file
            )));
        }
        if self.shots == Some(0) {
            return Err(ValidationError(format!(
                "record shots must be a positive integer: {}",
                self.file
            )));
        }
        for id in &self.job_ids {
            if id.trim().is_empty() {
                return Err(ValidationError(format!(
                    "record job_ids must not contain empty entries: {}",
                    self.file
                )));
            }
        }
        Ok(())
    }
}
