use crate::record::{EvidenceRecord, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Manifest schema version. Bumped only for breaking field changes;
/// additive evolution keeps the version stable.
pub const SCHEMA_VERSION: u32 = 2;

/// The ordered aggregate of all evidence records plus run-level metadata.
///
/// Record order is irrelevant to correctness but must be deterministic
/// (sorted by file path) wherever the manifest is rendered, so repeated
/// runs over an unchanged input set are byte-identical except for
/// `generated_utc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct EvidenceManifest {
    pub schema_version: u32,
    pub generated_utc: String,
    pub git_commit: String,
    pub evidence_sets: Vec<EvidenceRecord>,
}

impl EvidenceManifest {
    #[must_use]
    pub fn new(
        generated_utc: String,
        git_commit: String,
        evidence_sets: Vec<EvidenceRecord>,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            generated_utc,
            git_commit,
            evidence_sets,
        }
    }

    pub fn validate_strict(&self) -> Result<(), ValidationError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(ValidationError(format!(
                "manifest schema_version must be {SCHEMA_VERSION}, got {}",
                self.schema_version
            )));
        }
        if self.generated_utc.trim().is_empty() {
            return Err(ValidationError(
                "manifest generated_utc must not be empty".to_string(),
            ));
        }
        if self.git_commit.trim().is_empty() {
            return Err(ValidationError(
                "manifest git_commit must not be empty".to_string(),
            ));
        }
        for record in &self.evidence_sets {
            record.validate()?;
        }
        Ok(())
    }

    /// Rendering contract: records strictly sorted and unique by file path.
    pub fn validate_sorted(&self) -> Result<(), ValidationError> {
        let mut previous: Option<&EvidenceRecord> = None;
        for record in &self.evidence_sets {
            if let Some(prev) = previous {
                if prev.file >= record.file {
                    return Err(ValidationError(
                        "manifest records must be strictly sorted and unique by file".to_string(),
                    ));
                }
            }
            previous = Some(record);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub manifest: PathBuf,
    pub checksums: PathBuf,
    pub index: PathBuf,
    pub warnings: PathBuf,
}

#[must_use]
pub fn output_paths(evidence_dir: &Path) -> OutputPaths {
    OutputPaths {
        manifest: evidence_dir.join("manifest.json"),
        checksums: evidence_dir.join("SHA256SUMS"),
        index: evidence_dir.join("INDEX.md"),
        warnings: evidence_dir.join("WARNINGS.md"),
    }
}
