// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;

use provlint_model::{is_narrative_path, is_structured_path};
use serde_json::Value;

use crate::record::parse_document;
use crate::ScanError;

/// Output files the scanner itself writes into the evidence directory;
/// excluded from enumeration so repeated scans see an unchanged input set.
pub const OUTPUT_BASENAMES: [&str; 4] = ["manifest.json", "SHA256SUMS", "INDEX.md", "WARNINGS.md"];

/// One enumerated evidence file: relative `/`-separated path, raw bytes,
/// and the parsed document when the bytes are valid structured data.
#[derive(Debug, Clone)]
pub struct EvidenceSource {
    pub rel_path: String,
    pub bytes: Vec<u8>,
    pub document: Option<Value>,
}

impl EvidenceSource {
    #[must_use]
    pub fn is_structured(&self) -> bool {
        is_structured_path(&self.rel_path)
    }

    #[must_use]
    pub fn is_narrative(&self) -> bool {
        is_narrative_path(&self.rel_path)
    }
}

/// Recursively enumerates `*.json` / `*.md` files under the evidence
/// directory, sorted by relative path. An empty directory is legitimate
/// and yields an empty set.
pub fn enumerate_sources(evidence_dir: &Path) -> Result<Vec<EvidenceSource>, ScanError> {
    let mut rel_paths = Vec::new();
    collect_rel_paths(evidence_dir, evidence_dir, &mut rel_paths)?;
    rel_paths.sort();

    let mut sources = Vec::with_capacity(rel_paths.len());
    for rel_path in rel_paths {
        let full = evidence_dir.join(&rel_path);
        let bytes = fs::read(&full)
            .map_err(|e| ScanError(format!("failed to read {}: {e}", full.display())))?;
        let document = if is_structured_path(&rel_path) {
            parse_document(&bytes)
        } else {
            None
        };
        sources.push(EvidenceSource {
            rel_path,
            bytes,
            document,
        });
    }
    Ok(sources)
}

fn collect_rel_paths(root: &Path, dir: &Path, out: &mut Vec<String>) -> Result<(), ScanError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ScanError(format!("failed to read directory {}: {e}", dir.display())))?;
    for entry in entries {
        let entry =
            entry.map_err(|e| ScanError(format!("failed to read entry in {}: {e}", dir.display())))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| ScanError(format!("failed to stat {}: {e}", path.display())))?;
        if file_type.is_dir() {
            collect_rel_paths(root, &path, out)?;
            continue;
        }
        if !file_type.is_file() {
            continue;
        }
        let Ok(rel) = path.strip_prefix(root) else {
            continue;
        };
        let Some(rel_str) = rel.to_str() else {
            continue;
        };
        let rel_slash = rel_str.replace(std::path::MAIN_SEPARATOR, "/");
        if !is_structured_path(&rel_slash) && !is_narrative_path(&rel_slash) {
            continue;
        }
        if OUTPUT_BASENAMES.contains(&rel_slash.as_str()) {
            continue;
        }
        out.push(rel_slash);
    }
    Ok(())
}
