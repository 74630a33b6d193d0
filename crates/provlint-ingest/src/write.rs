// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::{Path, PathBuf};

use provlint_core::canonical;
use provlint_model::{ConsistencyReport, EvidenceManifest};

use crate::job::ScanJob;
use crate::render::{render_index, render_warnings};
use crate::ScanError;

#[derive(Debug, Clone)]
pub struct WrittenOutputs {
    pub manifest_path: PathBuf,
    pub checksums_path: PathBuf,
    pub index_path: Option<PathBuf>,
    pub warnings_path: Option<PathBuf>,
}

/// `<sha256>  <path>` lines sorted by path, trailing newline, the
/// coreutils `sha256sum -c` shape.
#[must_use]
pub fn render_checksums(manifest: &EvidenceManifest) -> String {
    let mut entries: Vec<(&str, &str)> = manifest
        .evidence_sets
        .iter()
        .map(|record| (record.file.as_str(), record.sha256.as_str()))
        .collect();
    entries.sort();
    let mut out = String::new();
    for (file, sha256) in entries {
        out.push_str(sha256);
        out.push_str("  ");
        out.push_str(file);
        out.push('\n');
    }
    out
}

fn write_text(path: &Path, text: &str) -> Result<(), ScanError> {
    fs::write(path, text)
        .map_err(|e| ScanError(format!("failed to write {}: {e}", path.display())))
}

/// Writes manifest.json (canonical bytes), SHA256SUMS, and the optional
/// markdown reports into the evidence directory.
pub fn write_scan_outputs(
    job: &ScanJob,
    manifest: &EvidenceManifest,
    report: &ConsistencyReport,
) -> Result<WrittenOutputs, ScanError> {
    manifest
        .validate_strict()
        .map_err(|e| ScanError(e.to_string()))?;
    manifest
        .validate_sorted()
        .map_err(|e| ScanError(e.to_string()))?;

    let layout = &job.output_layout;
    let manifest_bytes =
        canonical::stable_json_bytes(manifest).map_err(|e| ScanError(e.to_string()))?;
    fs::write(&layout.manifest, manifest_bytes)
        .map_err(|e| ScanError(format!("failed to write {}: {e}", layout.manifest.display())))?;

    write_text(&layout.checksums, &render_checksums(manifest))?;

    let index_path = if job.options.write_index {
        write_text(&layout.index, &render_index(manifest))?;
        Some(layout.index.clone())
    } else {
        None
    };

    let warnings_path = if job.options.write_warnings {
        write_text(&layout.warnings, &render_warnings(manifest, report))?;
        Some(layout.warnings.clone())
    } else {
        None
    };

    Ok(WrittenOutputs {
        manifest_path: layout.manifest.clone(),
        checksums_path: layout.checksums.clone(),
        index_path,
        warnings_path,
    })
}
